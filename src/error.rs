use std::path::PathBuf;

use crate::rules::TemplateError;

/// Library-level structured errors for mediabro.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum MediabroError {
	#[error("Profile not found: {name}")]
	ConfigNotFound { name: String },

	#[error("Config file not found: {path}")]
	ConfigFileNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Duplicate profile '{name}' in {path}")]
	DuplicateProfile { name: String, path: PathBuf },

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid replacement template '{template}' for pattern: {pattern}")]
	InvalidTemplate {
		pattern: String,
		template: String,
		#[source]
		source: TemplateError,
	},

	#[error("Rule has no capture group 1 to splice between prefix and suffix: {pattern}")]
	MissingCapture { pattern: String },

	#[error("Rule has no replacement (set `template` or `prefix`/`suffix`): {pattern}")]
	MissingReplacement { pattern: String },

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Failed to read directory: {path}")]
	DirectoryReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Playback rate {rate} is not one of the selectable speeds")]
	InvalidPlaybackRate { rate: f64 },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using MediabroError.
pub type Result<T> = std::result::Result<T, MediabroError>;
