/// Generate the `.mediabro.toml` written by `mediabro --init`.
pub fn generate_init_template() -> String {
	r#"# mediabro configuration
#
# Files named .mediabro.toml are collected from the current directory upward,
# then ~/.mediabro.toml. Profiles defined closer to the current directory win
# over ones further up, and over the built-in profiles of the same name
# (standard, collections, spliced).

# Stop walking up the directory tree after this file.
root = true

# Profile used when `mediabro resolve` is run without --profile.
default-profile = "my-lessons"

# Skip ~/.mediabro.toml when this environment variable is truthy.
# root-config-lookup-disable-env-var = "CI"

[[profiles]]
name = "my-lessons"
description = "Pair lesson PDFs with their audio"

# Rules are tried in order; the first pattern found anywhere in the link wins.
# Patterns are case-insensitive.

# Template form: $1..$99 insert capture groups, $& the whole match, $$ a dollar.
[[profiles.rules]]
pattern = 'clo_(\d{3}).*pdf'
template = "../Audio/ChineseLearnOnline_$1.mp3"

# Prefix/suffix form: prefix + capture group 1 + suffix.
[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:_ex)?\.(?:pdf|html?)'
prefix = "../"
suffix = "pr.aac"
"#
	.to_string()
}
