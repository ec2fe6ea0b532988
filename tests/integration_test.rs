#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// Command isolated from the developer's own ~/.mediabro.toml.
fn mediabro_cmd(home: &Path) -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("mediabro").unwrap();
	cmd.env("HOME", home)
		.env_remove("RUST_LOG")
		.current_dir(home);
	cmd
}

const SITE_CONFIG: &str = r#"
root = true
default-profile = "site"

[[profiles]]
name = "site"
description = "Video lessons"

[[profiles.rules]]
pattern = '(lesson\d+)\.pdf'
template = "video/$1.mp4"
"#;

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	mediabro_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Rewrite lesson links"));
}

#[test]
fn test_version_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	mediabro_cmd(temp_dir.path())
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("mediabro"));
}

#[test]
fn test_no_args_shows_help() {
	// With arg_required_else_help, no args should show help
	let temp_dir = tempfile::tempdir().unwrap();
	mediabro_cmd(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".mediabro.toml");

	mediabro_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .mediabro.toml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("[[profiles]]"));
	assert!(content.contains("[[profiles.rules]]"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".mediabro.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	mediabro_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));

	assert_eq!(fs::read_to_string(&config_path).unwrap(), "# existing");
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".mediabro.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["--init", "--force"])
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

#[test]
fn test_init_output_resolves() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.success();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "lessons/chinesepod/unit3.pdf"])
		.assert()
		.success()
		.stdout("../lessons/chinesepod/unit3pr.aac\n");
}

// ============================================================================
// resolve tests (built-in profiles)
// ============================================================================

#[test]
fn test_resolve_default_profile() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "foo_clo_042_bar.pdf"])
		.assert()
		.success()
		.stdout("../Audio/ChineseLearnOnline_042.mp3\n");
}

#[test]
fn test_resolve_content_link() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args([
			"resolve",
			"--profile",
			"standard",
			"lessons/chinesepod/unit3_ex.pdf",
		])
		.assert()
		.success()
		.stdout("../lessons/chinesepod/unit3pr.aac\n");
}

#[test]
fn test_resolve_spliced_profile() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "-p", "spliced", "clo_007_extra.pdf"])
		.assert()
		.success()
		.stdout("../Audio/ChineseLearnOnline_007.mp3\n");
}

#[test]
fn test_resolve_collections_profile() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "-p", "collections", "lessons/chinesepod/unit3/"])
		.assert()
		.success()
		.stdout("lessons/chinesepod/unit3/medialist.m3u\n");
}

#[test]
fn test_resolve_no_match_passes_through() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "notes.txt", "clo_001.pdf", "index.html"])
		.assert()
		.success()
		.stdout("notes.txt\n../Audio/ChineseLearnOnline_001.mp3\nindex.html\n");
}

#[test]
fn test_resolve_strict_fails_on_no_match() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "--strict", "notes.txt", "clo_001.pdf"])
		.assert()
		.failure()
		.stdout(predicate::str::contains("notes.txt"))
		.stderr(predicate::str::contains("1 input(s) matched no rule"));
}

#[test]
fn test_resolve_reads_stdin() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.arg("resolve")
		.write_stdin("clo_001.pdf\n\nchinesepod/unit3dg.mp3\n")
		.assert()
		.success()
		.stdout("../Audio/ChineseLearnOnline_001.mp3\npdf/chinesepod/unit3.pdf\n");
}

#[test]
fn test_resolve_unknown_profile() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "-p", "nope", "clo_001.pdf"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Profile not found: nope"));
}

#[test]
fn test_verbose_logs_matching_rule() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["-v", "resolve", "clo_001.pdf"])
		.assert()
		.success()
		.stdout("../Audio/ChineseLearnOnline_001.mp3\n")
		.stderr(predicate::str::contains("rule matched"));
}

// ============================================================================
// profiles subcommand tests
// ============================================================================

#[test]
fn test_profiles_list_builtins() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["profiles", "list"])
		.assert()
		.success()
		.stdout(predicate::str::contains("* standard (3 rules, built-in)"))
		.stdout(predicate::str::contains("  collections (5 rules, built-in)"))
		.stdout(predicate::str::contains("  spliced (3 rules, built-in)"));
}

#[test]
fn test_profiles_show() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["profiles", "show", "spliced"])
		.assert()
		.success()
		.stdout(predicate::str::contains("# Profile: spliced"))
		.stdout(predicate::str::contains("Rule 3:"))
		.stdout(predicate::str::contains(
			r#"prefix: "../Audio/ChineseLearnOnline_" suffix: ".mp3""#,
		));
}

#[test]
fn test_profiles_show_unknown() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["profiles", "show", "nope"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Profile not found"));
}

// ============================================================================
// playlist subcommand tests
// ============================================================================

#[test]
fn test_playlist_lists_media_files() {
	let temp_dir = tempfile::tempdir().unwrap();
	let lesson = temp_dir.path().join("chinesepod").join("unit3");
	fs::create_dir_all(&lesson).unwrap();
	fs::write(lesson.join("unit3pr.aac"), "").unwrap();
	fs::write(lesson.join("unit3.pdf"), "").unwrap();
	fs::write(lesson.join("Unit3dg.MP3"), "").unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["playlist", "chinesepod/unit3"])
		.assert()
		.success()
		.stdout("#EXTM3U\n\n#EXTINF:1.0,Unit3dg.MP3\nUnit3dg.MP3\n#EXTINF:1.0,unit3pr.aac\nunit3pr.aac\n");
}

#[test]
fn test_playlist_base_url() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("intro.mp4"), "").unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["playlist", "--base-url", "http://192.168.1.5:8000/lessons"])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"#EXTINF:1.0,intro.mp4\nhttp://192.168.1.5:8000/lessons/intro.mp4\n",
		));
}

#[test]
fn test_playlist_missing_folder() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["playlist", "nowhere"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to read directory"));
}

// ============================================================================
// Config discovery tests
// ============================================================================

#[test]
fn test_config_profile_and_default() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".mediabro.toml"), SITE_CONFIG).unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "course/Lesson12.PDF"])
		.assert()
		.success()
		.stdout("video/Lesson12.mp4\n");

	mediabro_cmd(temp_dir.path())
		.args(["profiles", "list"])
		.assert()
		.success()
		.stdout(predicate::str::contains("* site (1 rules,"))
		.stdout(predicate::str::contains("    Video lessons"))
		.stdout(predicate::str::contains("  standard (3 rules, built-in)"));
}

#[test]
fn test_config_found_from_subdirectory() {
	let temp_dir = tempfile::tempdir().unwrap();
	let subdir = temp_dir.path().join("course").join("week1");
	fs::create_dir_all(&subdir).unwrap();
	fs::write(temp_dir.path().join(".mediabro.toml"), SITE_CONFIG).unwrap();

	mediabro_cmd(temp_dir.path())
		.current_dir(&subdir)
		.args(["resolve", "lesson1.pdf"])
		.assert()
		.success()
		.stdout("video/lesson1.mp4\n");
}

#[test]
fn test_explicit_config_flag() {
	let home = tempfile::tempdir().unwrap();
	let elsewhere = tempfile::tempdir().unwrap();
	let config_path = elsewhere.path().join("links.toml");
	fs::write(&config_path, SITE_CONFIG).unwrap();

	mediabro_cmd(home.path())
		.arg("resolve")
		.arg("--config")
		.arg(&config_path)
		.arg("lesson7.pdf")
		.assert()
		.success()
		.stdout("video/lesson7.mp4\n");
}

#[test]
fn test_explicit_config_missing() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["resolve", "--config", "missing.toml", "lesson7.pdf"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_user_config_in_home() {
	let home = tempfile::tempdir().unwrap();
	let work = tempfile::tempdir().unwrap();
	fs::write(
		home.path().join(".mediabro.toml"),
		r#"
[[profiles]]
name = "home"

[[profiles.rules]]
pattern = '(\w+)\.epub'
prefix = "audiobooks/"
suffix = ".m4b"
"#,
	)
	.unwrap();

	mediabro_cmd(home.path())
		.current_dir(work.path())
		.args(["resolve", "-p", "home", "novel.epub"])
		.assert()
		.success()
		.stdout("audiobooks/novel.m4b\n");
}

#[test]
fn test_user_config_lookup_disabled_by_env() {
	let home = tempfile::tempdir().unwrap();
	let work = tempfile::tempdir().unwrap();
	fs::write(
		home.path().join(".mediabro.toml"),
		"[[profiles]]\nname = \"home\"\n",
	)
	.unwrap();
	fs::write(
		work.path().join(".mediabro.toml"),
		"root = true\nroot-config-lookup-disable-env-var = \"MEDIABRO_TEST_NO_HOME\"\n",
	)
	.unwrap();

	mediabro_cmd(home.path())
		.current_dir(work.path())
		.env("MEDIABRO_TEST_NO_HOME", "1")
		.args(["resolve", "-p", "home", "novel.epub"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Profile not found: home"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".mediabro.toml"), SITE_CONFIG).unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"))
		.stdout(predicate::str::contains("(1 profiles)"));
}

#[test]
fn test_config_validate_invalid_toml() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".mediabro.toml"), "invalid toml [[[").unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_validate_bad_group_reference() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".mediabro.toml"),
		r#"
root = true

[[profiles]]
name = "broken"

[[profiles.rules]]
pattern = 'clo_(\d{3})'
template = "$1-$2.mp3"
"#,
	)
	.unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid replacement template"))
		.stderr(predicate::str::contains("group $2 is referenced"));
}

#[test]
fn test_config_validate_unknown_default_profile() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".mediabro.toml"),
		"root = true\ndefault-profile = \"standrd\"\n",
	)
	.unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"))
		.stderr(predicate::str::contains("Profile not found: standrd"));
}

#[test]
fn test_config_validate_builtin_default_profile() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".mediabro.toml"),
		"root = true\ndefault-profile = \"spliced\"\n",
	)
	.unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("(0 profiles)"));
}

#[test]
fn test_config_validate_splice_without_group() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".mediabro.toml"),
		r#"
root = true

[[profiles]]
name = "broken"

[[profiles.rules]]
pattern = 'clo_\d{3}'
prefix = "../Audio/"
"#,
	)
	.unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("no capture group 1"));
}

#[test]
fn test_config_show_displays_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".mediabro.toml"), SITE_CONFIG).unwrap();

	mediabro_cmd(temp_dir.path())
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("# root: true"))
		.stdout(predicate::str::contains("# default-profile: site"))
		.stdout(predicate::str::contains("  site (1 rules)"))
		.stdout(predicate::str::contains("User config path"));
}
