use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{MediabroError, Result};
use crate::rules::RuleTable;

/// Top-level configuration from a `.mediabro.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade and jump directly to ~/.mediabro.toml.
	#[serde(default)]
	pub root: bool,

	/// Profile used when the caller does not name one.
	#[serde(default)]
	pub default_profile: Option<String>,

	/// Environment variable name that, if truthy, skips ~/.mediabro.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Named rule profiles defined by this file.
	#[serde(default)]
	pub profiles: Vec<ProfileDef>,
}

/// A named, ordered list of rewrite rules as written in a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileDef {
	pub name: String,

	#[serde(default)]
	pub description: Option<String>,

	/// Rules in evaluation order. First matching rule wins.
	#[serde(default)]
	pub rules: Vec<RuleDef>,
}

/// A single rewrite rule before compilation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuleDef {
	/// Regex searched for anywhere in the input, case-insensitively.
	pub pattern: String,

	/// Replacement with `$1`-style group references
	/// (mutually exclusive with prefix/suffix).
	pub template: Option<String>,

	/// Text placed before capture group 1 (mutually exclusive with template).
	pub prefix: Option<String>,

	/// Text placed after capture group 1 (mutually exclusive with template).
	pub suffix: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Where a profile definition came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
	/// Compiled into the binary.
	Builtin,
	/// Read from a config file.
	File(PathBuf),
}

impl std::fmt::Display for ProfileSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ProfileSource::Builtin => f.write_str("built-in"),
			ProfileSource::File(path) => write!(f, "{}", path.display()),
		}
	}
}

/// A profile definition with its source for debugging/display.
#[derive(Debug, Clone)]
pub struct ProfileWithSource {
	pub profile: ProfileDef,
	pub source: ProfileSource,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All profiles from all configs, in cascade order (first definition wins).
	pub profiles: Vec<ProfileWithSource>,

	/// The first `default-profile` set anywhere in the cascade.
	pub default_profile: Option<String>,
}

impl RuleDef {
	/// Validate that the rule names exactly one replacement form.
	pub fn validate(&self) -> Result<()> {
		let has_template = self.template.is_some();
		let has_splice = self.prefix.is_some() || self.suffix.is_some();

		match (has_template, has_splice) {
			(true, true) => {
				let other = if self.prefix.is_some() { "prefix" } else { "suffix" };
				Err(MediabroError::MutuallyExclusive {
					option1: "template".to_string(),
					option2: other.to_string(),
				})
			}
			(false, false) => Err(MediabroError::MissingReplacement {
				pattern: self.pattern.clone(),
			}),
			_ => Ok(()),
		}
	}
}

impl Config {
	/// Validate every profile in this config, compiling its rules so that bad
	/// patterns and group references surface at load time.
	pub fn validate(&self, path: &std::path::Path) -> Result<()> {
		let mut seen = std::collections::HashSet::new();
		for profile in &self.profiles {
			if !seen.insert(profile.name.as_str()) {
				return Err(MediabroError::DuplicateProfile {
					name: profile.name.clone(),
					path: path.to_path_buf(),
				});
			}
			RuleTable::compile(&profile.name, &profile.rules)?;
		}
		Ok(())
	}
}
