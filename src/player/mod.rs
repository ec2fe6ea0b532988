//! Playback-speed selection for the audio and video players.
//!
//! The page shows one of two players at a time. A speed change goes to
//! whichever player is visible; with neither visible the selector falls back
//! to normal speed.

use crate::error::{MediabroError, Result};

/// Slowest selectable speed, in percent.
const MIN_SPEED_PERCENT: u32 = 50;
/// Fastest selectable speed, in percent.
const MAX_SPEED_PERCENT: u32 = 200;
const SPEED_STEP_PERCENT: usize = 10;
/// How close a requested rate must be to a selector value to count as it.
const RATE_TOLERANCE: f64 = 1e-9;

/// Index of 1x in [`speed_options`].
pub const DEFAULT_SPEED_INDEX: usize = 5;

/// One entry of the speed selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedOption {
	/// Label such as `0.5x`, `1x` or `1.5x`.
	pub name: String,
	pub value: f64,
}

/// The selectable speeds, 0.5x to 2x in 0.1 steps.
pub fn speed_options() -> Vec<SpeedOption> {
	(MIN_SPEED_PERCENT..=MAX_SPEED_PERCENT)
		.step_by(SPEED_STEP_PERCENT)
		.map(|percent| {
			let value = f64::from(percent) / 100.0;
			SpeedOption {
				name: format!("{value}x"),
				value,
			}
		})
		.collect()
}

/// A player element on the page.
pub trait MediaElement {
	fn is_visible(&self) -> bool;

	fn set_playback_rate(&mut self, rate: f64);
}

/// Which player a speed change was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
	Audio,
	Video,
	/// Neither player was visible; the selection was reset.
	None,
}

/// State behind the speed selector.
#[derive(Debug, Clone)]
pub struct PlaybackController {
	options: Vec<SpeedOption>,
	current_speed: f64,
}

impl Default for PlaybackController {
	fn default() -> Self {
		Self::new()
	}
}

impl PlaybackController {
	pub fn new() -> Self {
		let options = speed_options();
		let current_speed = options[DEFAULT_SPEED_INDEX].value;
		PlaybackController {
			options,
			current_speed,
		}
	}

	pub fn options(&self) -> &[SpeedOption] {
		&self.options
	}

	pub fn current_speed(&self) -> f64 {
		self.current_speed
	}

	pub fn default_speed(&self) -> f64 {
		self.options[DEFAULT_SPEED_INDEX].value
	}

	/// The selector entry whose value is `rate`, if any.
	pub fn option_for(&self, rate: f64) -> Option<&SpeedOption> {
		self.options
			.iter()
			.find(|option| (option.value - rate).abs() < RATE_TOLERANCE)
	}

	/// Apply `rate` to the visible player, audio taking precedence.
	///
	/// `rate` must be one of [`options`](Self::options); anything else
	/// (including NaN) fails with `InvalidPlaybackRate` and touches neither
	/// player.
	pub fn set_playback_rate(
		&mut self,
		rate: f64,
		audio: &mut dyn MediaElement,
		video: &mut dyn MediaElement,
	) -> Result<PlaybackTarget> {
		let Some(rate) = self.option_for(rate).map(|option| option.value) else {
			tracing::warn!(rate, "rejected playback rate outside the speed selector");
			return Err(MediabroError::InvalidPlaybackRate { rate });
		};

		let target = if audio.is_visible() {
			audio.set_playback_rate(rate);
			PlaybackTarget::Audio
		} else if video.is_visible() {
			video.set_playback_rate(rate);
			PlaybackTarget::Video
		} else {
			self.current_speed = self.default_speed();
			tracing::debug!(rate, "no visible player, speed reset");
			return Ok(PlaybackTarget::None);
		};

		self.current_speed = rate;
		tracing::debug!(rate, ?target, "playback rate applied");
		Ok(target)
	}
}
