//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/draftly/config.toml)
//! 3. Environment variables (DRAFTLY_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::secret::DEFAULT_SECRET_LENGTH;

/// Environment variable prefix
const ENV_PREFIX: &str = "DRAFTLY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (SQLite db)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Site root used to build document permalinks
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Length of generated share secrets
    #[serde(default = "default_secret_length")]
    pub secret_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: default_base_url(),
            secret_length: default_secret_length(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (DRAFTLY_DATA_DIR, DRAFTLY_BASE_URL, DRAFTLY_SECRET_LENGTH)
    /// 2. Config file (~/.config/draftly/config.toml or DRAFTLY_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // DRAFTLY_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // DRAFTLY_BASE_URL
        if let Ok(val) = std::env::var(format!("{}_BASE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.base_url = val;
            }
        }

        // DRAFTLY_SECRET_LENGTH
        if let Ok(val) = std::env::var(format!("{}_SECRET_LENGTH", ENV_PREFIX)) {
            if let Ok(len) = val.parse::<usize>() {
                if len > 0 {
                    self.secret_length = len;
                }
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DRAFTLY_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftly")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("draftly.db")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("draftly")
}

/// Get the default site root
fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_secret_length() -> usize {
    DEFAULT_SECRET_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "DRAFTLY_DATA_DIR",
        "DRAFTLY_BASE_URL",
        "DRAFTLY_SECRET_LENGTH",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.secret_length, DEFAULT_SECRET_LENGTH);
        assert!(config.data_dir.ends_with("draftly"));
    }

    #[test]
    fn test_sqlite_path() {
        let config = Config::default();
        assert!(config.sqlite_path().ends_with("draftly.db"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DRAFTLY_DATA_DIR", "/tmp/draftly-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/draftly-test"));
    }

    #[test]
    fn test_env_override_base_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DRAFTLY_BASE_URL", "https://drafts.example.com");
        config.apply_env_overrides();
        assert_eq!(config.base_url, "https://drafts.example.com");

        // Empty string keeps the existing value
        env::set_var("DRAFTLY_BASE_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.base_url, "https://drafts.example.com");
    }

    #[test]
    fn test_env_override_secret_length() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("DRAFTLY_SECRET_LENGTH", "12");
        config.apply_env_overrides();
        assert_eq!(config.secret_length, 12);

        // Zero and garbage are ignored
        env::set_var("DRAFTLY_SECRET_LENGTH", "0");
        config.apply_env_overrides();
        assert_eq!(config.secret_length, 12);

        env::set_var("DRAFTLY_SECRET_LENGTH", "lots");
        config.apply_env_overrides();
        assert_eq!(config.secret_length, 12);
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/draftly"),
            base_url: "https://site.example".to_string(),
            secret_length: 8,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("secret_length"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.secret_length, config.secret_length);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            base_url = "https://example.com"
            secret_length = 10
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.secret_length, 10);
    }

    #[test]
    fn test_load_from_str_partial() {
        let _guard = EnvGuard::new(ENV_VARS);

        // Missing keys fall back to defaults
        let config = Config::load_from_str(r#"base_url = "https://x.example""#).unwrap();
        assert_eq!(config.base_url, "https://x.example");
        assert_eq!(config.secret_length, DEFAULT_SECRET_LENGTH);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("DRAFTLY_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert_eq!(config.base_url, "http://localhost");
    }
}
