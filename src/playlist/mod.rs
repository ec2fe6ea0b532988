//! Lesson-folder playlists.
//!
//! The `collections` profile rewrites a lesson folder to its
//! [`MEDIALIST_M3U`]. This module builds that playlist: it keeps the audio and
//! video files of a folder and renders them as an extended M3U document.

use std::fmt::Write;
use std::path::Path;

use crate::error::{MediabroError, Result};

/// File name a lesson folder's playlist is published under.
pub const MEDIALIST_M3U: &str = "medialist.m3u";

/// Extensions that go into a playlist.
pub const MEDIA_EXTENSIONS: &[&str] = &[
	"3gp", "3gpp", "aac", "aiff", "avi", "mov", "mp1", "mp2", "mp3", "mp4", "m4a", "vob", "mkv",
	"flac", "m4v", "mpeg", "mpg", "oga", "ogg", "ogv", "ogm", "wav", "webm", "wma", "wmv",
];

/// Duration written to every `#EXTINF` line; players read the real length
/// from the file.
const EXTINF_DURATION: &str = "1.0";

/// Broad kind of a file, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
	Pdf,
	Audio,
	Video,
	Html,
	Image,
	Markdown,
	Text,
	/// Source code, config and playlist files.
	Code,
	Unknown,
}

impl FileKind {
	/// Classify `name` by its extension, ignoring case.
	pub fn from_name(name: &str) -> Self {
		let Some(ext) = extension(name) else {
			return FileKind::Unknown;
		};

		match ext.as_str() {
			"pdf" => FileKind::Pdf,
			"aac" | "ape" | "flac" | "m4a" | "mp3" | "oga" | "ogg" | "wav" => FileKind::Audio,
			"3gp" | "3gpp" | "m4v" | "mkv" | "mov" | "mp4" | "ogm" | "ogv" | "opus" | "vob"
			| "webm" => FileKind::Video,
			"asp" | "htm" | "html" | "mhtm" | "php" => FileKind::Html,
			"bmp" | "gif" | "heic" | "jpeg" | "jpg" | "png" | "svg" | "webp" => FileKind::Image,
			"md" => FileKind::Markdown,
			"cfg" | "ics" | "ini" | "log" | "rst" | "srt" | "txt" | "vtt" | "cue" => FileKind::Text,
			"bat" | "c" | "conf" | "cpp" | "cs" | "css" | "dart" | "go" | "gradle" | "groovy"
			| "h" | "hpp" | "ipynb" | "java" | "js" | "json" | "kt" | "lua" | "m" | "m3u"
			| "m3u8" | "pl" | "plist" | "properties" | "py" | "rb" | "rs" | "scss" | "sh"
			| "sql" | "swift" | "ts" | "tsx" | "xml" | "yaml" | "yml" | "zsh" => FileKind::Code,
			_ => FileKind::Unknown,
		}
	}
}

/// Whether `name` is an audio or video file that belongs in a playlist.
pub fn is_media_file(name: &str) -> bool {
	extension(name).is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(name: &str) -> Option<String> {
	Path::new(name)
		.extension()
		.and_then(|e| e.to_str())
		.map(str::to_lowercase)
}

/// One candidate line of a playlist: the title shown and the link played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
	pub name: String,
	pub url: String,
}

impl PlaylistEntry {
	pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			url: url.into(),
		}
	}
}

/// Render the media entries of `entries` as an extended M3U playlist.
///
/// Entries that are not media files are dropped; the rest keep their order.
pub fn render_m3u(entries: &[PlaylistEntry]) -> String {
	let mut playlist = String::from("#EXTM3U\n\n");

	for entry in entries.iter().filter(|e| is_media_file(&e.name)) {
		let _ = writeln!(playlist, "#EXTINF:{EXTINF_DURATION},{}", entry.name);
		let _ = writeln!(playlist, "{}", entry.url);
	}

	playlist
}

/// Playlist entries for the files directly inside `dir`, sorted by name
/// without regard to case.
///
/// Each URL is the file name, appended to `base_url` when one is given.
/// Without a base URL the entries are relative to the playlist's own folder.
pub fn list_directory(dir: &Path, base_url: Option<&str>) -> Result<Vec<PlaylistEntry>> {
	let read_error = |source: std::io::Error| MediabroError::DirectoryReadError {
		path: dir.to_path_buf(),
		source,
	};

	let mut names = Vec::new();
	for entry in std::fs::read_dir(dir).map_err(read_error)? {
		let entry = entry.map_err(read_error)?;
		if !entry.file_type().map_err(read_error)?.is_file() {
			continue;
		}
		names.push(entry.file_name().to_string_lossy().into_owned());
	}
	names.sort_by_cached_key(|name| name.to_lowercase());

	tracing::debug!(dir = %dir.display(), files = names.len(), "listed playlist folder");

	Ok(names
		.into_iter()
		.map(|name| {
			let url = match base_url {
				Some(base) => format!("{}/{name}", base.trim_end_matches('/')),
				None => name.clone(),
			};
			PlaylistEntry { name, url }
		})
		.collect())
}
