//! Saved defaults for the importer.
//!
//! Optional TOML file holding the values the operator would otherwise type
//! every run (music folder, extensions, playlist name, delays).  Command
//! line arguments always win over file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration defaults that can be saved to a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_log: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_secs: Option<u64>,
}

impl Config {
    /// Create a new empty config.
    pub fn new() -> Self {
        Config::default()
    }

    /// Get the config file path (~/.config/ytm-import/defaults.toml).
    pub fn get_config_path() -> Result<PathBuf, io::Error> {
        let home = std::env::var("HOME").map_err(|_| {
            io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set")
        })?;

        let config_dir = Path::new(&home).join(".config").join("ytm-import");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from file.  A missing file yields an empty config.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Config::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to its default location.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    /// Merge this config with another, preferring values from other.
    pub fn merge(&mut self, other: &Config) {
        if other.folder.is_some() {
            self.folder = other.folder.clone();
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions.clone();
        }
        if other.playlist_name.is_some() {
            self.playlist_name = other.playlist_name.clone();
        }
        if other.playlist_description.is_some() {
            self.playlist_description = other.playlist_description.clone();
        }
        if other.auth_file.is_some() {
            self.auth_file = other.auth_file.clone();
        }
        if other.skip_log.is_some() {
            self.skip_log = other.skip_log.clone();
        }
        if other.settle_secs.is_some() {
            self.settle_secs = other.settle_secs;
        }
        if other.batch_secs.is_some() {
            self.batch_secs = other.batch_secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_empty() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("defaults.toml")).unwrap();
        assert!(config.folder.is_none());
        assert!(config.settle_secs.is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            playlist_name: Some("Old".to_string()),
            settle_secs: Some(3),
            ..Config::new()
        };
        let override_with = Config {
            playlist_name: Some("New".to_string()),
            batch_secs: Some(0),
            ..Config::new()
        };

        base.merge(&override_with);
        assert_eq!(base.playlist_name.as_deref(), Some("New"));
        assert_eq!(base.settle_secs, Some(3));
        assert_eq!(base.batch_secs, Some(0));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config {
            folder: Some("/music".to_string()),
            extensions: Some(vec!["mp3".to_string(), "flac".to_string()]),
            ..Config::new()
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.folder.as_deref(), Some("/music"));
        assert_eq!(parsed.extensions.unwrap().len(), 2);
    }
}
