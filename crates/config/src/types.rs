//! Configuration sections

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::{ConfigError, Result};

/// Which database engine the writer targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    /// Embedded single-file engine
    Embedded,
    /// Client-server engine
    Postgres,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub engine: DatabaseEngine,
    /// File path for the embedded engine
    pub path: String,
    /// Connection URL for the client-server engine
    pub url: String,
    /// Rows per writer batch
    pub batch_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: DatabaseEngine::Embedded,
            path: "data/umalink.db".into(),
            url: String::new(),
            batch_size: 1000,
        }
    }
}

/// Session tuning section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Timeout around the vendor open call
    pub open_timeout_secs: u64,
    /// Download status poll interval
    pub status_poll_ms: u64,
    /// No-progress window before a stall retry
    pub stall_timeout_secs: u64,
    /// Close-wait-reopen attempts
    pub max_reopen_attempts: u32,
    /// Per-chunk wall-clock budget when chunks run in worker processes
    pub chunk_timeout_secs: u64,
    /// Host each backfill chunk in its own worker process
    pub isolate_chunks: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            open_timeout_secs: 300,
            status_poll_ms: 80,
            stall_timeout_secs: 60,
            max_reopen_attempts: 5,
            chunk_timeout_secs: 300,
            isolate_chunks: false,
        }
    }
}

/// Live-monitor section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Cycle interval in seconds
    pub interval_secs: u64,
    /// Real-time data specs to poll
    pub specs: Vec<String>,
    /// Data spec fetched when a historical catch-up is triggered
    pub historical_spec: String,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            specs: vec!["0B12".into()],
            historical_spec: "RACE".into(),
        }
    }
}

/// Local control surface section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8765,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vendor service key (the regional feed ignores it and uses its
    /// documented literal init key)
    pub service_key: String,
    /// Directory for resume-state files
    pub state_dir: Option<PathBuf>,
    /// Path to the vendor bridge executable
    pub bridge_executable: Option<PathBuf>,
    pub database: DatabaseConfig,
    pub session: SessionSection,
    pub monitor: MonitorSection,
    pub control: ControlConfig,
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject contradictory settings
    pub fn validate(&self) -> Result<()> {
        match self.database.engine {
            DatabaseEngine::Embedded => {
                if self.database.path.is_empty() {
                    return Err(ConfigError::missing("database.path"));
                }
            }
            DatabaseEngine::Postgres => {
                if self.database.url.is_empty() {
                    return Err(ConfigError::missing("database.url"));
                }
            }
        }
        if self.database.batch_size == 0 {
            return Err(ConfigError::invalid(
                "database.batch_size",
                "must be at least 1",
            ));
        }
        if self.monitor.specs.is_empty() {
            return Err(ConfigError::invalid(
                "monitor.specs",
                "at least one real-time spec is required",
            ));
        }
        if self.monitor.interval_secs < 30 {
            return Err(ConfigError::invalid(
                "monitor.interval_secs",
                "the vendor rejects polling faster than every 30 s",
            ));
        }
        if self.monitor.historical_spec.is_empty() {
            return Err(ConfigError::missing("monitor.historical_spec"));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.batch_size, 1000);
        assert_eq!(config.control.port, 8765);
        assert_eq!(config.monitor.specs, vec!["0B12".to_string()]);
        assert_eq!(config.monitor.historical_spec, "RACE");
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.session.open_timeout_secs, 300);
        assert!(!config.session.isolate_chunks);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_str(
            r#"
service_key = "KEY123"

[database]
batch_size = 250

[monitor]
interval_secs = 45
specs = ["0B12", "0B30"]
"#,
        )
        .unwrap();
        assert_eq!(config.service_key, "KEY123");
        assert_eq!(config.database.batch_size, 250);
        assert_eq!(config.monitor.interval_secs, 45);
        // Untouched sections keep defaults
        assert_eq!(config.session.stall_timeout_secs, 60);
    }

    #[test]
    fn test_postgres_requires_url() {
        let result = Config::from_str("[database]\nengine = \"postgres\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_monitor_interval_floor() {
        let result = Config::from_str("[monitor]\ninterval_secs = 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = Config::from_str("[database]\nbatch_size = 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load("/does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
