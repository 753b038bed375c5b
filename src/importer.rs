//! Import orchestration.
//!
//! Sequences the whole run: search each scanned track, filter by artist
//! match, log what was skipped, then create the playlist and push matched
//! ids in fixed-size batches.  Every remote call is issued and awaited in
//! sequence with fixed settle/inter-batch delays to respect the service's
//! rate expectations; there is no retry, no rollback and no parallel
//! fan-out.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::matcher::is_artist_match;
use crate::progress::ProgressSink;
use crate::scanner::{scan_folder, LocalTrack};
use crate::ytmusic::MusicService;

/// Items added to the playlist per edit call.
pub const BATCH_SIZE: usize = 100;

/// Why a track was left out of the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Results existed, but none of the top candidates' artists matched.
    ArtistMismatch,
    /// The search returned nothing at all.
    NoResults,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ArtistMismatch => write!(f, "Artist Mismatch"),
            SkipReason::NoResults => write!(f, "No Results Found"),
        }
    }
}

/// One skipped track, recorded for the skip-log artifact.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub query: String,
    pub reason: SkipReason,
}

/// Outcome of the search-and-match step for one track.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched { video_id: String, title: String },
    SkippedArtistMismatch,
    SkippedNoResults,
}

/// Knobs for one import run.  Delays are explicit so tests can run with
/// zero pacing.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub playlist_name: String,
    pub playlist_description: String,
    /// Skip-log artifact path; overwritten on every run that has skips.
    pub skip_log_path: PathBuf,
    /// Pause after playlist creation, before the first batch.
    pub settle_delay: Duration,
    /// Pause between batch-add calls.
    pub batch_delay: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            playlist_name: "Imported Local Music".to_string(),
            playlist_description: "Automatically imported from local drive.".to_string(),
            skip_log_path: PathBuf::from("skipped_songs.txt"),
            settle_delay: Duration::from_secs(3),
            batch_delay: Duration::from_secs(2),
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct ImportReport {
    pub scanned: usize,
    pub matched: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Set when a playlist was created (at least one match existed).
    pub playlist_id: Option<String>,
}

/// Search one track and decide its outcome.
///
/// At most the first 3 ranked results are examined; the first whose
/// credited artists pass the fuzzy match wins.
pub fn match_track(
    service: &dyn MusicService,
    track: &LocalTrack,
) -> Result<MatchOutcome, Box<dyn Error>> {
    let results = service.search(&track.search_query)?;
    if results.is_empty() {
        return Ok(MatchOutcome::SkippedNoResults);
    }

    let expected = track.expected_artist.as_deref().unwrap_or("");
    for result in results.iter().take(3) {
        if is_artist_match(expected, &result.artists) {
            return Ok(MatchOutcome::Matched {
                video_id: result.video_id.clone(),
                title: result.title.clone(),
            });
        }
    }
    Ok(MatchOutcome::SkippedArtistMismatch)
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedupe_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Scan `folder` and run the import over whatever it yields.
pub fn import_folder(
    service: &dyn MusicService,
    folder: &Path,
    extensions: &[String],
    options: &ImportOptions,
    sink: &dyn ProgressSink,
) -> Result<ImportReport, Box<dyn Error>> {
    sink.append(&format!(
        "Scanning directory and subfolders: {}",
        folder.display()
    ));
    sink.append(&format!("Looking for file types: {}", extensions.join(", ")));

    let tracks = scan_folder(folder, extensions);
    run_import(service, &tracks, options, sink)
}

/// Run the full sequential import over already-scanned tracks.
///
/// Per-track skips are absorbed into the skip log and never stop the run;
/// an empty catalog and any remote error are fatal.  A remote failure
/// during playlist creation or batch add aborts the remaining upload steps
/// without rolling back batches that already landed.
pub fn run_import(
    service: &dyn MusicService,
    tracks: &[LocalTrack],
    options: &ImportOptions,
    sink: &dyn ProgressSink,
) -> Result<ImportReport, Box<dyn Error>> {
    if tracks.is_empty() {
        return Err("No valid music files found matching your selected types.".into());
    }

    sink.append(&format!("Found {} songs. Starting search...", tracks.len()));

    let mut video_ids: Vec<String> = Vec::new();
    let mut skipped: Vec<SkippedEntry> = Vec::new();

    for track in tracks {
        match match_track(service, track)? {
            MatchOutcome::Matched { video_id, title } => {
                sink.append(&format!(
                    "[SUCCESS] {} -> Matched with '{}'",
                    track.search_query, title
                ));
                video_ids.push(video_id);
            }
            MatchOutcome::SkippedArtistMismatch => {
                sink.append(&format!(
                    "[SKIPPED] {} -> Artist names did not match.",
                    track.search_query
                ));
                skipped.push(SkippedEntry {
                    query: track.search_query.clone(),
                    reason: SkipReason::ArtistMismatch,
                });
            }
            MatchOutcome::SkippedNoResults => {
                sink.append(&format!(
                    "[FAILED]  {} -> No results found.",
                    track.search_query
                ));
                skipped.push(SkippedEntry {
                    query: track.search_query.clone(),
                    reason: SkipReason::NoResults,
                });
            }
        }
    }

    if !skipped.is_empty() {
        match write_skip_log(&options.skip_log_path, &skipped) {
            Ok(()) => sink.append(&format!(
                "[NOTE] Saved {} skipped songs to '{}'",
                skipped.len(),
                options.skip_log_path.display()
            )),
            Err(e) => sink.append(&format!("Failed to write skipped log: {}", e)),
        }
    }

    let matched = video_ids.len();
    let playlist_id = if !video_ids.is_empty() {
        let unique_ids = dedupe_preserving_order(&video_ids);

        sink.append(&format!("Creating playlist '{}'...", options.playlist_name));
        let playlist_id =
            service.create_playlist(&options.playlist_name, &options.playlist_description)?;

        sink.append(&format!(
            "Waiting {:.0} seconds for the remote servers to sync...",
            options.settle_delay.as_secs_f64()
        ));
        thread::sleep(options.settle_delay);

        sink.append(&format!(
            "Pushing {} unique songs in batches...",
            unique_ids.len()
        ));
        for (index, batch) in unique_ids.chunks(BATCH_SIZE).enumerate() {
            let start = index * BATCH_SIZE + 1;
            let end = index * BATCH_SIZE + batch.len();
            sink.append(&format!("-> Uploading batch {} to {}...", start, end));
            service.add_playlist_items(&playlist_id, batch, true)?;
            thread::sleep(options.batch_delay);
        }

        sink.append("*** IMPORT COMPLETE! *** Check your music account.");
        Some(playlist_id)
    } else {
        sink.append("No songs were successfully matched to add to a playlist.");
        None
    };

    Ok(ImportReport {
        scanned: tracks.len(),
        matched,
        skipped,
        playlist_id,
    })
}

/// Overwrite the skip-log artifact: a human-readable header plus one
/// "query (Reason)" line per skipped track.
fn write_skip_log(path: &Path, skipped: &[SkippedEntry]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "--- Songs unable to be matched automatically ---")?;
    writeln!(file)?;
    for entry in skipped {
        writeln!(file, "{} ({})", entry.query, entry.reason)?;
    }
    Ok(())
}
