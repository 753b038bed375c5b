//! Interactive credential setup.
//!
//! Prompts for each request header captured from an authenticated
//! music.youtube.com browser session and writes the credential artifact
//! consumed by `ytm_import`.  Empty values for required headers are
//! refused.
//!
//! Usage:
//!   setup_auth [OUTPUT_FILE]     (default: headers_auth.json)

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use ytm_import::auth::{AuthHeaders, DEFAULT_AUTH_FILE};

/// Prompted headers with their suggested defaults, in entry order.
const HEADER_PROMPTS: &[(&str, &str)] = &[
    ("User-Agent", ""),
    ("Accept", "*/*"),
    ("Accept-Language", "en-GB,en-US;q=0.9,en;q=0.8"),
    ("Content-Type", "application/json"),
    ("X-Goog-AuthUser", "0"),
    ("x-origin", "https://music.youtube.com"),
    ("Authorization", ""),
    ("Cookie", ""),
];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = args
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_AUTH_FILE.to_string());

    println!("Paste your YouTube Music request headers below.");
    println!("Press Enter to accept a shown default.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut raw = BTreeMap::new();

    for (key, default_value) in HEADER_PROMPTS {
        let value = loop {
            if default_value.is_empty() {
                print!("{}: ", key);
            } else {
                print!("{} [{}]: ", key, default_value);
            }
            let _ = io::stdout().flush();

            let entered = match lines.next() {
                Some(Ok(line)) => line.trim().to_string(),
                _ => {
                    eprintln!("\nInput closed; aborting.");
                    process::exit(1);
                }
            };

            let value = if entered.is_empty() {
                default_value.to_string()
            } else {
                entered
            };
            if value.is_empty() {
                println!("The field '{}' cannot be empty!", key);
                continue;
            }
            break value;
        };

        raw.insert(key.to_string(), value);
    }

    let headers = match AuthHeaders::from_map(raw) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = headers.save(Path::new(&output)) {
        eprintln!("Failed to save file: {}", e);
        process::exit(1);
    }

    println!("\nAuthentication file '{}' created successfully.", output);
    println!("You can now start the import.");
}
