//! Configuration management for quiethn.
//!
//! Configuration is read from `~/.config/quiethn/config.toml` (or the path
//! given with `--config`). Every field is optional; missing fields and a
//! missing file fall back to the defaults below. Command-line flags and the
//! `PORT`/`ENV` environment variables are applied on top by the CLI.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT_SECS;
use crate::fetcher::parallel::DEFAULT_WORKERS;
use crate::pipeline::DEFAULT_DISPLAY_LIMIT;
use crate::scheduler::{ScheduleConfig, DEFAULT_INTERVAL_SECS};

pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the upstream API, ending in `/`
    pub api_base_url: String,
    /// Maximum number of stories served (default: 30)
    pub display_limit: usize,
    /// Seconds between refreshes (default: 3600)
    pub refresh_interval_secs: u64,
    /// Refresh as soon as the server starts (default: true)
    pub refresh_on_start: bool,
    /// Maximum concurrent item requests during a refresh (default: 10)
    pub workers: usize,
    /// Per-request timeout for upstream calls in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Address the HTTP server binds to
    pub bind: String,
    /// Deployment environment; `dev` disables the HTTPS redirect
    pub env: String,
    /// Directory served under `/static/`
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            refresh_interval_secs: DEFAULT_INTERVAL_SECS,
            refresh_on_start: true,
            workers: DEFAULT_WORKERS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            bind: "0.0.0.0:8080".to_string(),
            env: "production".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// An explicitly given path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };

        config.validated()
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/quiethn/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quiethn").join("config.toml"))
    }

    /// Normalize and check values that would otherwise fail at runtime.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        url::Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::Invalid(format!("api_base_url {:?}: {}", self.api_base_url, e)))?;

        // Endpoint paths are appended directly to the base.
        if !self.api_base_url.ends_with('/') {
            self.api_base_url.push('/');
        }

        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_secs must be at least 1".into(),
            ));
        }

        Ok(self)
    }

    pub fn is_dev(&self) -> bool {
        self.env.eq_ignore_ascii_case("dev")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            interval_secs: self.refresh_interval_secs,
            refresh_on_start: self.refresh_on_start,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default().validated().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.display_limit, 30);
        assert_eq!(config.refresh_interval_secs, 3600);
        assert_eq!(config.workers, 10);
        assert!(config.refresh_on_start);
        assert!(!config.is_dev());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.display_limit, 30);
        assert_eq!(config.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
display_limit = 10
env = "dev"
"#;
        let config: Config = toml::from_str(content).expect("Partial config should work");
        assert_eq!(config.display_limit, 10);
        assert!(config.is_dev());
        // Default value
        assert_eq!(config.workers, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"api_base_url = "http://localhost:9000/v0"
refresh_interval_secs = 600
workers = 4"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/v0/");
        assert_eq!(config.schedule().interval_secs, 600);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("nope.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_bad_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display_limit = \"many\"").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validation() {
        let config = Config {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));

        let config = Config {
            api_base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));
    }
}
