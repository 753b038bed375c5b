pub mod auth;
pub mod config;
pub mod importer;
pub mod matcher;
pub mod normalize;
pub mod progress;
pub mod scanner;
pub mod ytmusic;

pub use auth::AuthHeaders;
pub use config::Config;
pub use importer::{
    import_folder, run_import, ImportOptions, ImportReport, MatchOutcome, SkipReason,
};
pub use matcher::{is_artist_match, similarity_ratio};
pub use normalize::normalize;
pub use progress::{spawn_import, ChannelSink, MemorySink, ProgressSink, StdoutSink};
pub use scanner::{scan_folder, LocalTrack, DEFAULT_EXTENSIONS};
pub use ytmusic::{MusicService, SearchResult, YtMusicSession};
