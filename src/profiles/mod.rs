//! Named rule profiles: the built-in set plus any defined in config files.

pub mod builtin;

use crate::config::types::{Config, MergedConfig, ProfileSource, ProfileWithSource};
use crate::error::{MediabroError, Result};
use crate::rules::RuleTable;
use std::path::PathBuf;
use std::sync::LazyLock;

pub use builtin::DEFAULT_PROFILE;

/// The profiles available to a caller, most specific first.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
	profiles: Vec<ProfileWithSource>,
	default_profile: String,
}

impl ProfileCatalog {
	/// Catalog containing only the built-in profiles.
	pub fn builtin() -> Result<Self> {
		Self::from_merged(MergedConfig::default())
	}

	/// Catalog from merged config files, with built-ins appended unless a
	/// config already defines a profile of the same name.
	pub fn from_merged(merged: MergedConfig) -> Result<Self> {
		let mut profiles = merged.profiles;

		for profile in builtin_profiles()? {
			if let Some(existing) = profiles
				.iter()
				.find(|p| p.profile.name == profile.profile.name)
			{
				tracing::debug!(
					profile = %existing.profile.name,
					source = %existing.source,
					"built-in profile shadowed"
				);
				continue;
			}
			profiles.push(profile.clone());
		}

		Ok(ProfileCatalog {
			profiles,
			default_profile: merged
				.default_profile
				.unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
		})
	}

	/// Name of the profile used when none is requested.
	pub fn default_profile(&self) -> &str {
		&self.default_profile
	}

	pub fn profiles(&self) -> &[ProfileWithSource] {
		&self.profiles
	}

	pub fn get(&self, name: &str) -> Option<&ProfileWithSource> {
		self.profiles.iter().find(|p| p.profile.name == name)
	}

	/// Compile the rule table for `name`.
	pub fn load_profile(&self, name: &str) -> Result<RuleTable> {
		let entry = self
			.get(name)
			.ok_or_else(|| MediabroError::ConfigNotFound {
				name: name.to_string(),
			})?;

		RuleTable::compile(&entry.profile.name, &entry.profile.rules)
	}
}

/// Load one of the built-in profiles by name.
///
/// Only the requested profile is compiled.
pub fn load_profile(name: &str) -> Result<RuleTable> {
	let profile = builtin_profiles()?
		.iter()
		.find(|p| p.profile.name == name)
		.ok_or_else(|| MediabroError::ConfigNotFound {
			name: name.to_string(),
		})?;

	RuleTable::compile(&profile.profile.name, &profile.profile.rules)
}

/// Built-in profile definitions, parsed from TOML once per process.
///
/// Rules are compiled per lookup, not here.
static PARSED_BUILTINS: LazyLock<std::result::Result<Vec<ProfileWithSource>, toml::de::Error>> =
	LazyLock::new(|| {
		let config: Config = toml::from_str(builtin::BUILTIN_PROFILES)?;
		tracing::debug!(profiles = config.profiles.len(), "parsed built-in profiles");
		Ok(config
			.profiles
			.into_iter()
			.map(|profile| ProfileWithSource {
				profile,
				source: ProfileSource::Builtin,
			})
			.collect())
	});

fn builtin_profiles() -> Result<&'static [ProfileWithSource]> {
	PARSED_BUILTINS
		.as_deref()
		.map_err(|source| MediabroError::ConfigParseError {
			path: PathBuf::from(builtin::BUILTIN_SOURCE),
			source: source.clone(),
		})
}
