//! Local music catalog scanner.
//!
//! Walks a directory tree, keeps files whose extension matches the accepted
//! set, reads embedded tags with lofty and derives one search query per
//! file.  Files whose tags cannot be read at all are silently excluded;
//! files that merely lack tags fall back to filename-based derivation.

use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use walkdir::WalkDir;

/// Default accepted extensions when the caller does not choose any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "wav", "ogg"];

/// One scanned local file, ready to be searched for remotely.
///
/// Immutable; discarded after its search attempt.
#[derive(Debug, Clone)]
pub struct LocalTrack {
    /// File name (no directory components).
    pub filename: String,
    /// Query string to send to the remote search.
    pub search_query: String,
    /// Artist name the remote result is expected to carry, if known.
    pub expected_artist: Option<String>,
}

/// Recursively scan `root` for audio files with one of the accepted
/// extensions (case-insensitive, with or without a leading dot) and derive
/// a [`LocalTrack`] per readable file, in traversal order.
pub fn scan_folder(root: &Path, extensions: &[String]) -> Vec<LocalTrack> {
    let suffixes: Vec<String> = extensions
        .iter()
        .map(|e| {
            let e = e.to_lowercase();
            if e.starts_with('.') { e } else { format!(".{}", e) }
        })
        .collect();

    let mut tracks = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().to_string();
        let lower = filename.to_lowercase();
        if !suffixes.iter().any(|s| lower.ends_with(s.as_str())) {
            continue;
        }

        // A tag-read error excludes the file; absent tags do not.
        let (artist, title) = match read_tags(entry.path()) {
            Ok(pair) => pair,
            Err(_) => continue,
        };

        let stem = file_stem(&filename);
        let (search_query, expected_artist) = derive_query(artist, title, stem);
        tracks.push(LocalTrack {
            filename,
            search_query,
            expected_artist,
        });
    }

    tracks
}

/// Read the artist and title tags of an audio file.
fn read_tags(path: &Path) -> Result<(Option<String>, Option<String>), lofty::error::LoftyError> {
    let tagged_file = Probe::open(path)?.read()?;
    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

    Ok(match tag {
        Some(tag) => (
            tag.artist().map(|s| s.to_string()).filter(|s| !s.is_empty()),
            tag.title().map(|s| s.to_string()).filter(|s| !s.is_empty()),
        ),
        None => (None, None),
    })
}

/// Derive the search query and expected artist for one file.
///
/// Precedence: both tags → "{artist} {title}"; title only → title;
/// filename stem containing " - " → left part is the artist; otherwise the
/// bare stem.  A present title with an absent artist does *not* attempt
/// filename-based artist extraction.
fn derive_query(
    artist: Option<String>,
    title: Option<String>,
    stem: &str,
) -> (String, Option<String>) {
    match (artist, title) {
        (Some(artist), Some(title)) => {
            let query = format!("{} {}", artist, title);
            (query, Some(artist))
        }
        (None, Some(title)) => (title, None),
        (_, None) if stem.contains(" - ") => {
            let (left, right) = stem.split_once(" - ").unwrap_or((stem, ""));
            let artist = left.trim().to_string();
            let query = format!("{} {}", artist, right.trim());
            (query, Some(artist))
        }
        (artist, None) => (stem.to_string(), artist),
    }
}

/// Filename without its final extension.
fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}
