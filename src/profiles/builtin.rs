//! Rule profiles shipped with mediabro.
//!
//! Each profile is an independent rule set for the chinese-learn-online and
//! chinesepod lesson layouts. They are never merged: `collections` adds
//! folder/playlist rules and `spliced` uses the prefix/suffix form.

/// Profile used when neither the command line nor a config names one.
pub const DEFAULT_PROFILE: &str = "standard";

/// Pseudo-path reported when the built-in definitions fail to parse.
pub const BUILTIN_SOURCE: &str = "<built-in>";

pub const BUILTIN_PROFILES: &str = r#"
[[profiles]]
name = "standard"
description = "Lesson PDFs to audio and chinesepod documents to media"

# chineselearnonline.com
[[profiles.rules]]
pattern = 'clo_(\d{3}).*pdf'
template = "../Audio/ChineseLearnOnline_$1.mp3"

# chinesepod content links (pdf, html)
[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:_ex)?\.(pdf|html?)'
template = "../$1pr.aac"

# chinesepod media links (aac, mp3, m4a)
[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:(dg|pr|rv))?\.(aac|mp3|m4a)'
template = "pdf/$1.pdf"


[[profiles]]
name = "collections"
description = "The standard rules plus lesson folder and playlist links"

[[profiles.rules]]
pattern = 'clo_(\d{3}).*pdf'
template = "../Audio/ChineseLearnOnline_$1.mp3"

[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:_ex)?\.(pdf|html?)'
template = "../$1pr.aac"

[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:(dg|pr|rv))?\.(aac|mp3|m4a)'
template = "pdf/$1.pdf"

# chinesepod lesson folder to its playlist
[[profiles.rules]]
pattern = '(.*chinesepod.*?)/$'
template = "$1/medialist.m3u"

# chinesepod playlist back to its folder
[[profiles.rules]]
pattern = '(.*chinesepod.*?)/medialist\.m3u8?$'
template = "$1/"


[[profiles]]
name = "spliced"
description = "The standard rules written as prefix/suffix pairs"

[[profiles.rules]]
pattern = 'clo_(\d{3}).*pdf'
prefix = "../Audio/ChineseLearnOnline_"
suffix = ".mp3"

[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:_ex)?\.(?:pdf|html?)'
prefix = "../"
suffix = "pr.aac"

[[profiles.rules]]
pattern = '(.*chinesepod.*?)(?:dg|pr|rv)?\.(?:aac|mp3|m4a)'
prefix = "pdf/"
suffix = ".pdf"
"#;
