use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{NoteError, Result};

/// Environment variable overriding the configured store URL.
pub const STORE_URL_ENV: &str = "NOTEKEEP_STORE_URL";
/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "NOTEKEEP_API_KEY";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted database, e.g. `https://xyz.supabase.co`
    pub store_url: String,

    /// Key sent as `apikey` and bearer token on every request
    pub api_key: Option<String>,

    /// Name of the notes table
    pub table: String,

    /// Request timeout for the HTTP client, in seconds
    pub request_timeout_secs: u64,

    /// Command used to open notes in an external editor
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            api_key: None,
            table: "notes".to_string(),
            request_timeout_secs: 30,
            editor_command: None,
        }
    }
}

impl Config {
    /// Default location of the configuration file, inside the platform config dir.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "notekeep").ok_or_else(|| NoteError::ConfigError {
            message: "Could not determine a home directory".to_string(),
        })?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Reads the configuration file at `path`, or the defaults when it does
    /// not exist.
    pub fn read(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        } else {
            debug!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            Ok(Config::default())
        }
    }

    /// Reads the configuration, applies environment overrides and validates
    /// the result.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Config::read(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            debug!("Store URL overridden by {}", STORE_URL_ENV);
            self.store_url = url;
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            debug!("API key overridden by {}", API_KEY_ENV);
            self.api_key = Some(key);
        }
    }

    /// Checks that the settings can be used to reach a store.
    pub fn validate(&self) -> Result<()> {
        let url = self.store_url.trim();
        if url.is_empty() {
            return Err(NoteError::ConfigError {
                message: "store_url must not be empty".to_string(),
            });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NoteError::ConfigError {
                message: format!("store_url must be an http(s) URL, got '{}'", url),
            });
        }
        if self.table.trim().is_empty() {
            return Err(NoteError::ConfigError {
                message: "table must not be empty".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(NoteError::ConfigError {
                message: "request_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Updates one setting from a `key=value` pair.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| NoteError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "store_url" => self.store_url = value.to_string(),
            "api_key" => self.api_key = non_empty(value),
            "table" => self.table = value.to_string(),
            "request_timeout_secs" => {
                self.request_timeout_secs =
                    value.parse().map_err(|_| NoteError::ConfigError {
                        message: format!("request_timeout_secs must be a number, got '{}'", value),
                    })?
            }
            "editor_command" => self.editor_command = non_empty(value),
            other => {
                return Err(NoteError::ConfigError {
                    message: format!("Unknown setting: {}", other),
                })
            }
        }

        self.validate()
    }

    /// Editor to launch for `--editor`: the configured command, then
    /// `$EDITOR`, then the first common editor found on `PATH`.
    pub fn get_editor_command(&self) -> String {
        self.editor_command
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(platform_editor)
    }
}

fn platform_editor() -> String {
    if cfg!(windows) {
        return "notepad".to_string();
    }
    if cfg!(target_os = "macos") {
        return "open -W -t".to_string();
    }
    ["nano", "vim", "vi", "emacs"]
        .into_iter()
        .find(|candidate| which(candidate).is_ok())
        .unwrap_or("vi")
        .to_string()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.table, "notes");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!path.exists());

        let partial: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, Config::default());
    }

    #[test]
    fn save_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.set("store_url=https://example.supabase.co").unwrap();
        config.set("api_key=anon-key").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::read(&path).unwrap();
        assert_eq!(loaded.store_url, "https://example.supabase.co");
        assert_eq!(loaded.api_key.as_deref(), Some("anon-key"));
        assert_eq!(loaded.table, "notes");
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("colour=blue"),
            Err(NoteError::ConfigError { .. })
        ));
        assert!(config.set("request_timeout_secs=soon").is_err());
        assert!(config.set("request_timeout_secs=0").is_err());
        assert!(config.set("store_url=ftp://nope").is_err());
        assert!(config.set("no equals sign").is_err());
    }

    #[test]
    fn empty_value_clears_optional_settings() {
        let mut config = Config {
            api_key: Some("k".to_string()),
            ..Config::default()
        };
        config.set("api_key=").unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn configured_editor_wins() {
        let config = Config {
            editor_command: Some("code --wait".to_string()),
            ..Config::default()
        };
        assert_eq!(config.get_editor_command(), "code --wait");
    }

    #[test]
    fn platform_editor_is_never_blank() {
        assert!(!platform_editor().trim().is_empty());
    }
}
