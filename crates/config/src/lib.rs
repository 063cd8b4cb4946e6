//! Umalink Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! A minimal config should just work - only specify what you need to change.
//!
//! # Example Minimal Config
//!
//! ```toml
//! service_key = "YOUR-VENDOR-KEY"
//!
//! [database]
//! engine = "embedded"
//! path = "data/umalink.db"
//! ```
//!
//! Everything else falls back to the documented vendor-safe defaults.
//! `Config::validate` rejects contradictory settings before any vendor or
//! database connection is attempted.

mod error;
mod types;

pub use error::ConfigError;
pub use types::{
    Config, ControlConfig, DatabaseConfig, DatabaseEngine, MonitorSection, SessionSection,
};

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
