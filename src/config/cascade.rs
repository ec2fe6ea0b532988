use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, ProfileSource, ProfileWithSource};
use crate::error::{MediabroError, Result};
use std::path::{Path, PathBuf};

/// File name looked for in each directory of the cascade and in $HOME.
pub const CONFIG_FILE_NAME: &str = ".mediabro.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.mediabro.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.mediabro.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	// Walk up the directory tree
	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = parse_config_file(&config_path)?;
			let is_root = config.root;

			tracing::debug!(path = %config_path.display(), root = is_root, "found config");
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if is_root {
				break;
			}
		}

		// Move to parent directory
		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	// Check user config unless disabled by env var
	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.mediabro.toml if it exists and isn't disabled.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	// Check if any config disables user config lookup via env var
	for loaded in existing_configs {
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var
			&& is_env_truthy(env_var)
		{
			tracing::debug!(env_var = %env_var, "user config lookup disabled");
			return Ok(None);
		}
	}

	let user_config_path = user_config_path()?;

	// The walk may already have reached $HOME
	if existing_configs.iter().any(|c| c.path == user_config_path) {
		return Ok(None);
	}

	if user_config_path.exists() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Load exactly one config file, bypassing discovery.
pub fn load_config_file(path: &Path) -> Result<Vec<LoadedConfig>> {
	if !path.exists() {
		return Err(MediabroError::ConfigFileNotFound {
			path: path.to_path_buf(),
		});
	}

	let config = parse_config_file(path)?;
	Ok(vec![LoadedConfig {
		config,
		path: path.to_path_buf(),
	}])
}

/// Merge multiple configs into a single effective config.
///
/// Profiles are collected in cascade order; a later definition of an
/// already-seen name is dropped. The first `default-profile` wins.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		for profile in &loaded.config.profiles {
			if merged
				.profiles
				.iter()
				.any(|p| p.profile.name == profile.name)
			{
				tracing::debug!(
					profile = %profile.name,
					path = %loaded.path.display(),
					"profile shadowed by a more specific config"
				);
				continue;
			}
			merged.profiles.push(ProfileWithSource {
				profile: profile.clone(),
				source: ProfileSource::File(loaded.path.clone()),
			});
		}

		if merged.default_profile.is_none() {
			merged.default_profile = loaded.config.default_profile.clone();
		}
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(MediabroError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
