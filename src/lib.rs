//! Mediabro - link rewriting rules that pair lesson documents with their media.
//!
//! This library provides the core functionality for mediabro, including:
//! - Built-in and user-defined rule profiles
//! - Configuration file parsing and cascade discovery
//! - First-match-wins resolution of a link to its alternate resource
//! - Playback-speed selection for the audio and video players
//! - M3U playlists for lesson folders
//!
//! # Example
//!
//! ```
//! use mediabro::profiles::load_profile;
//! use mediabro::rules::Resolution;
//!
//! let table = load_profile("standard").unwrap();
//!
//! match table.resolve("foo_clo_042_bar.pdf").unwrap() {
//!     Resolution::Rewritten { output, .. } => {
//!         assert_eq!(output, "../Audio/ChineseLearnOnline_042.mp3");
//!     }
//!     Resolution::NoMatch => unreachable!(),
//! }
//! ```

pub mod config;
pub mod error;
pub mod player;
pub mod playlist;
pub mod profiles;
pub mod rules;

pub use error::{MediabroError, Result};
