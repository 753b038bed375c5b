//! Append-only progress reporting and the background import worker.
//!
//! The orchestrator never prints directly: it appends lines to an injected
//! [`ProgressSink`], so a CLI can stream them to stdout while an embedding
//! surface can forward them over a channel.  Single writer (the worker),
//! single reader.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use crate::importer::{run_import, ImportOptions, ImportReport};
use crate::scanner::LocalTrack;
use crate::ytmusic::MusicService;

/// Append-only text sink for run progress.
pub trait ProgressSink {
    fn append(&self, line: &str);
}

/// Prints each progress line to stdout.
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn append(&self, line: &str) {
        println!("{}", line);
    }
}

/// Forwards each progress line over an mpsc channel; a dropped receiver
/// silently discards further lines.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        ChannelSink { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn append(&self, line: &str) {
        let _ = self.tx.send(line.to_string());
    }
}

/// Collects progress lines in memory; used by tests.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressSink for MemorySink {
    fn append(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Run the import on one background thread.
///
/// The caller keeps its interactive surface responsive and re-enables its
/// trigger when the handle joins.  There is no cancellation; the run
/// completes or the process exits.  Errors cross the thread boundary as
/// text, which is all the operator-facing surfaces display anyway.
pub fn spawn_import<S>(
    service: S,
    tracks: Vec<LocalTrack>,
    options: ImportOptions,
    sink: Box<dyn ProgressSink + Send>,
) -> JoinHandle<Result<ImportReport, String>>
where
    S: MusicService + Send + 'static,
{
    thread::spawn(move || {
        run_import(&service, &tracks, &options, sink.as_ref()).map_err(|e| e.to_string())
    })
}
