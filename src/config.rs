//! Guard configuration.
//!
//! Every deployment so far uses the defaults below; the load/save pair exists
//! for embedders that relocate the auth page or rename the storage keys.
//! Configuration is stored at `~/.config/brandklout-guard/config.json`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Directory name used for the config path
const APP_NAME: &str = "brandklout-guard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Fixed session lifetime: 4 hours.
pub const DEFAULT_SESSION_DURATION_MS: i64 = 4 * 60 * 60 * 1000;

/// Both the validator re-check and the countdown re-render run once a minute.
pub const DEFAULT_CHECK_INTERVAL_MS: i64 = 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Auth page filename, resolved relative to the current page on redirect.
    pub auth_page: String,
    /// Persistent storage key holding the Session Record.
    pub session_key: String,
    /// Tab-scoped storage key holding the Return-Page Marker.
    pub return_page_key: String,
    /// Return page recorded when the current path has no filename.
    pub default_return_page: String,
    pub session_duration_ms: i64,
    pub check_interval_ms: i64,
    /// Hostnames treated as local development; deterrents stay off there.
    pub local_hosts: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            auth_page: "auth.html".to_string(),
            session_key: "brandklout_auth".to_string(),
            return_page_key: "brandklout_return_page".to_string(),
            default_return_page: "index.html".to_string(),
            session_duration_ms: DEFAULT_SESSION_DURATION_MS,
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            local_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],
        }
    }
}

impl GuardConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployed_site() {
        let config = GuardConfig::default();
        assert_eq!(config.auth_page, "auth.html");
        assert_eq!(config.session_key, "brandklout_auth");
        assert_eq!(config.return_page_key, "brandklout_return_page");
        assert_eq!(config.session_duration_ms, 4 * 60 * 60 * 1000);
        assert_eq!(config.check_interval_ms, 60 * 1000);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GuardConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.auth_page, GuardConfig::default().auth_page);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = GuardConfig::default();
        config.auth_page = "login.html".to_string();
        config.save_to(&path).unwrap();

        let loaded = GuardConfig::load_from(&path).unwrap();
        assert_eq!(loaded.auth_page, "login.html");
        // Unset fields keep their defaults through serde(default)
        assert_eq!(loaded.session_key, "brandklout_auth");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auth_page":"gate.html"}"#).unwrap();

        let loaded = GuardConfig::load_from(&path).unwrap();
        assert_eq!(loaded.auth_page, "gate.html");
        assert_eq!(loaded.session_duration_ms, DEFAULT_SESSION_DURATION_MS);
    }
}
