use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mediabro::config::{
	CONFIG_FILE_NAME, LoadedConfig, discover_configs, generate_init_template, load_config_file,
	merge_configs, user_config_path,
};
use mediabro::playlist::{list_directory, render_m3u};
use mediabro::profiles::ProfileCatalog;

#[derive(Parser)]
#[command(name = "mediabro")]
#[command(
	author,
	version,
	about = "Rewrite lesson links to their matching audio, video or PDF"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Use this config file instead of discovering .mediabro.toml files
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Log rule matching and config discovery to stderr
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Create a template .mediabro.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .mediabro.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite links with the first matching rule of a profile
	Resolve {
		/// Profile to use (defaults to the configured default-profile)
		#[arg(short, long)]
		profile: Option<String>,

		/// Exit with failure if any input matches no rule
		#[arg(long)]
		strict: bool,

		/// Links to rewrite; read from stdin, one per line, when omitted
		inputs: Vec<String>,
	},
	/// Inspect rule profiles
	Profiles {
		#[command(subcommand)]
		action: ProfilesAction,
	},
	/// Print the M3U playlist of a lesson folder's audio and video files
	Playlist {
		/// Folder to list
		#[arg(default_value = ".")]
		dir: PathBuf,

		/// URL prefix for each entry; entries are relative when omitted
		#[arg(long, value_name = "URL")]
		base_url: Option<String>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ProfilesAction {
	/// List available profiles, marking the default
	List,
	/// Display the rules of one profile in evaluation order
	Show {
		/// Profile name
		name: String,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered configuration files in cascade order
	Show,
	/// Check all config files for errors without resolving anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	// Respect RUST_LOG if set, otherwise pick a level from the verbose flag
	let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
		if verbose {
			"mediabro=debug".to_string()
		} else {
			"mediabro=warn".to_string()
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(&env_filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	let config = cli.config.as_deref();

	// Handle subcommands
	match cli.command {
		Some(Commands::Resolve {
			profile,
			strict,
			inputs,
		}) => handle_resolve(config, profile, strict, inputs),
		Some(Commands::Profiles { action }) => match action {
			ProfilesAction::List => handle_profiles_list(config),
			ProfilesAction::Show { name } => handle_profiles_show(config, &name),
		},
		Some(Commands::Playlist { dir, base_url }) => handle_playlist(&dir, base_url.as_deref()),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(config),
			ConfigAction::Validate => handle_config_validate(config),
		},
		// No command specified - this shouldn't happen due to arg_required_else_help
		None => Ok(ExitCode::SUCCESS),
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

/// Load config files from `--config` or by discovery from the current directory.
fn load_configs(config: Option<&Path>) -> Result<Vec<LoadedConfig>> {
	match config {
		Some(path) => load_config_file(path)
			.with_context(|| format!("Failed to load config {}", path.display())),
		None => {
			let cwd = std::env::current_dir().context("Failed to get current directory")?;
			discover_configs(&cwd).context("Failed to discover config files")
		}
	}
}

fn load_catalog(config: Option<&Path>) -> Result<ProfileCatalog> {
	let configs = load_configs(config)?;
	ProfileCatalog::from_merged(merge_configs(&configs)).context("Failed to load profiles")
}

fn handle_resolve(
	config: Option<&Path>,
	profile: Option<String>,
	strict: bool,
	inputs: Vec<String>,
) -> Result<ExitCode> {
	let catalog = load_catalog(config)?;
	let name = profile.unwrap_or_else(|| catalog.default_profile().to_string());
	let table = catalog
		.load_profile(&name)
		.with_context(|| format!("Failed to load profile '{name}'"))?;

	let inputs = if inputs.is_empty() {
		std::io::stdin()
			.lines()
			.collect::<std::io::Result<Vec<_>>>()
			.context("Failed to read links from stdin")?
			.into_iter()
			.filter(|line| !line.trim().is_empty())
			.collect()
	} else {
		inputs
	};

	let mut stdout = std::io::stdout().lock();
	let mut unmatched = 0usize;

	for input in &inputs {
		let resolution = table
			.resolve(input)
			.with_context(|| format!("Failed to resolve: {input}"))?;
		if !resolution.is_match() {
			unmatched += 1;
		}
		writeln!(stdout, "{}", resolution.or_original(input)).context("Failed to write output")?;
	}

	if strict && unmatched > 0 {
		eprintln!("{unmatched} input(s) matched no rule in profile '{name}'");
		return Ok(ExitCode::FAILURE);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_profiles_list(config: Option<&Path>) -> Result<ExitCode> {
	let catalog = load_catalog(config)?;

	for entry in catalog.profiles() {
		let name = &entry.profile.name;
		let marker = if name == catalog.default_profile() {
			"*"
		} else {
			" "
		};
		println!(
			"{} {} ({} rules, {})",
			marker,
			name,
			entry.profile.rules.len(),
			entry.source
		);
		if let Some(ref description) = entry.profile.description {
			println!("    {}", description);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_profiles_show(config: Option<&Path>, name: &str) -> Result<ExitCode> {
	let catalog = load_catalog(config)?;
	let table = catalog
		.load_profile(name)
		.with_context(|| format!("Failed to load profile '{name}'"))?;

	println!("# Profile: {}", table.name());
	if let Some(entry) = catalog.get(name) {
		println!("# source: {}", entry.source);
		if let Some(ref description) = entry.profile.description {
			println!("# {}", description);
		}
	}
	println!("# rules: {}", table.len());
	println!();

	for (i, rule) in table.rules().iter().enumerate() {
		println!("  Rule {}:", i + 1);
		println!("    pattern: {}", rule.pattern.as_str());
		println!("    {}", rule.replacement);
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_playlist(dir: &Path, base_url: Option<&str>) -> Result<ExitCode> {
	let entries = list_directory(dir, base_url)
		.with_context(|| format!("Failed to build playlist for {}", dir.display()))?;

	print!("{}", render_m3u(&entries));
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: Option<&Path>) -> Result<ExitCode> {
	let configs = load_configs(config)?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");

		for loaded in &configs {
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", loaded.config.root);
			if let Some(ref default) = loaded.config.default_profile {
				println!("# default-profile: {}", default);
			}
			if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var {
				println!("# root-config-lookup-disable-env-var: {}", env_var);
			}
			println!("# profiles: {}", loaded.config.profiles.len());
			for profile in &loaded.config.profiles {
				println!("  {} ({} rules)", profile.name, profile.rules.len());
			}
			println!();
		}
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

/// Parse every config file, then check that the merged default profile exists
/// and compiles.
fn validate_configs(config: Option<&Path>) -> Result<Vec<LoadedConfig>> {
	let configs = load_configs(config)?;
	let catalog =
		ProfileCatalog::from_merged(merge_configs(&configs)).context("Failed to load profiles")?;
	let default = catalog.default_profile();
	catalog
		.load_profile(default)
		.with_context(|| format!("Failed to load default profile '{default}'"))?;
	Ok(configs)
}

fn handle_config_validate(config: Option<&Path>) -> Result<ExitCode> {
	match validate_configs(config) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} profiles)",
						loaded.path.display(),
						loaded.config.profiles.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:?}");
			Ok(ExitCode::FAILURE)
		}
	}
}
