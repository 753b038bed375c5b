//! Command-line front end for the YouTube Music library importer.
//!
//! Usage:
//!   ytm_import <FOLDER> [--name NAME] [--desc TEXT] [--ext mp3,flac,...]
//!              [--auth FILE] [--skip-log FILE]
//!              [--settle-secs N] [--batch-secs N]
//!
//! Values omitted on the command line fall back to
//! `~/.config/ytm-import/defaults.toml`, then to built-in defaults.
//! Run `setup_auth` first to generate the credential file.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use ytm_import::auth::{AuthHeaders, DEFAULT_AUTH_FILE};
use ytm_import::importer::ImportOptions;
use ytm_import::progress::ChannelSink;
use ytm_import::scanner::{scan_folder, DEFAULT_EXTENSIONS};
use ytm_import::ytmusic::YtMusicSession;
use ytm_import::{spawn_import, Config};

fn usage() -> ! {
    eprintln!("Usage: ytm_import <FOLDER> [--name NAME] [--desc TEXT] [--ext mp3,flac,...]");
    eprintln!("                  [--auth FILE] [--skip-log FILE] [--settle-secs N] [--batch-secs N]");
    process::exit(2);
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
    }

    let mut config = Config::load().unwrap_or_default();
    config.merge(&args_config(&args));

    let folder = match args.first().filter(|a| !a.starts_with("--")) {
        Some(f) => PathBuf::from(f),
        None => match &config.folder {
            Some(f) => PathBuf::from(f),
            None => usage(),
        },
    };
    if !folder.is_dir() {
        eprintln!("Error: '{}' is not a folder", folder.display());
        process::exit(1);
    }

    let extensions: Vec<String> = config.extensions.clone().unwrap_or_else(|| {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    });
    if extensions.is_empty() {
        eprintln!("Error: select at least one file type");
        process::exit(1);
    }

    let auth_path = config
        .auth_file
        .clone()
        .unwrap_or_else(|| DEFAULT_AUTH_FILE.to_string());

    let mut options = ImportOptions::default();
    if let Some(name) = config.playlist_name.clone() {
        options.playlist_name = name;
    }
    if let Some(desc) = config.playlist_description.clone() {
        options.playlist_description = desc;
    }
    if let Some(path) = config.skip_log.clone() {
        options.skip_log_path = PathBuf::from(path);
    }
    if let Some(secs) = config.settle_secs {
        options.settle_delay = Duration::from_secs(secs);
    }
    if let Some(secs) = config.batch_secs {
        options.batch_delay = Duration::from_secs(secs);
    }

    println!("Connecting to YouTube Music...");
    let headers = match AuthHeaders::load(Path::new(&auth_path)) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("[FATAL ERROR] {}", e);
            process::exit(1);
        }
    };
    let session = match YtMusicSession::connect(headers) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[FATAL ERROR] Failed to authenticate. Your auth file might be expired or invalid.");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("Scanning directory and subfolders: {}", folder.display());
    println!("Looking for file types: {}", extensions.join(", "));
    let tracks = scan_folder(&folder, &extensions);

    // One background worker; the main thread only mirrors progress lines.
    let (tx, rx) = mpsc::channel();
    let handle = spawn_import(session, tracks, options, Box::new(ChannelSink::new(tx)));

    for line in rx {
        println!("{}", line);
    }

    match handle.join() {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
        Err(_) => {
            eprintln!("[ERROR] import worker panicked");
            process::exit(1);
        }
    }
}

/// Translate command-line flags into a [`Config`] overlay.
fn args_config(args: &[String]) -> Config {
    Config {
        folder: None,
        extensions: flag_value(args, "--ext")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect()),
        playlist_name: flag_value(args, "--name"),
        playlist_description: flag_value(args, "--desc"),
        auth_file: flag_value(args, "--auth"),
        skip_log: flag_value(args, "--skip-log"),
        settle_secs: flag_value(args, "--settle-secs").and_then(|v| v.parse().ok()),
        batch_secs: flag_value(args, "--batch-secs").and_then(|v| v.parse().ok()),
    }
}
