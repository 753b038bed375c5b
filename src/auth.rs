//! Stored request headers for the YouTube Music session.
//!
//! The credential artifact is a JSON file of request-header key/value pairs
//! captured from an authenticated browser session (Authorization, Cookie,
//! User-Agent, …).  Every API request replays these headers.  A missing or
//! incomplete file is a fatal precondition for an import run.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Default location of the credential artifact, next to the binary.
pub const DEFAULT_AUTH_FILE: &str = "headers_auth.json";

/// Header keys that must be present and non-empty.  Keys are stored
/// lowercased; HTTP headers are case-insensitive anyway.
pub const REQUIRED_HEADERS: &[&str] = &[
    "user-agent",
    "accept",
    "accept-language",
    "content-type",
    "x-goog-authuser",
    "x-origin",
    "authorization",
    "cookie",
];

/// Validated header map loaded from the credential artifact.
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    headers: BTreeMap<String, String>,
}

impl AuthHeaders {
    /// Build from a raw key/value map, lowercasing keys and rejecting any
    /// missing or empty required header.
    pub fn from_map(raw: BTreeMap<String, String>) -> Result<Self, Box<dyn Error>> {
        let headers: BTreeMap<String, String> = raw
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        for key in REQUIRED_HEADERS {
            match headers.get(*key) {
                Some(v) if !v.trim().is_empty() => {}
                _ => return Err(format!("auth header '{}' is missing or empty", key).into()),
            }
        }

        Ok(AuthHeaders { headers })
    }

    /// Load and validate the credential artifact.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            return Err(format!(
                "'{}' not found - run setup_auth first to generate your login file",
                path.display()
            )
            .into());
        }

        let content = fs::read_to_string(path)?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Self::from_map(raw)
    }

    /// Write the headers back out as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(&self.headers)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_lowercase()).map(|s| s.as_str())
    }

    /// Iterate over all stored header pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full_map() -> BTreeMap<String, String> {
        REQUIRED_HEADERS
            .iter()
            .map(|k| (k.to_string(), format!("value-{}", k)))
            .collect()
    }

    #[test]
    fn test_from_map_accepts_complete_headers() {
        let auth = AuthHeaders::from_map(full_map()).unwrap();
        assert_eq!(auth.get("Cookie"), Some("value-cookie"));
    }

    #[test]
    fn test_from_map_lowercases_keys() {
        let mut raw = full_map();
        raw.remove("authorization");
        raw.insert("Authorization".to_string(), "SAPISIDHASH abc".to_string());
        let auth = AuthHeaders::from_map(raw).unwrap();
        assert_eq!(auth.get("authorization"), Some("SAPISIDHASH abc"));
    }

    #[test]
    fn test_from_map_rejects_missing_or_empty() {
        let mut raw = full_map();
        raw.remove("cookie");
        assert!(AuthHeaders::from_map(raw).is_err());

        let mut raw = full_map();
        raw.insert("cookie".to_string(), "  ".to_string());
        assert!(AuthHeaders::from_map(raw).is_err());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = AuthHeaders::load(&dir.path().join("headers_auth.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("headers_auth.json");

        let auth = AuthHeaders::from_map(full_map()).unwrap();
        auth.save(&path).unwrap();

        let reloaded = AuthHeaders::load(&path).unwrap();
        assert_eq!(reloaded.get("authorization"), Some("value-authorization"));
    }
}
