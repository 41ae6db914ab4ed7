//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use domain::LifecyclePolicy;

/// How log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `DATABASE_PATH`: JSON database file; unset keeps everything in memory
/// - `LIFECYCLE_POLICY`: `strict` or `permissive` (default: `strict`)
/// - `BROADCAST_CAPACITY`: realtime frames buffered per screen (default: `256`)
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_path: Option<PathBuf>,
    pub lifecycle_policy: LifecyclePolicy,
    pub broadcast_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
            database_path: lookup("DATABASE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            lifecycle_policy: lookup("LIFECYCLE_POLICY")
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            broadcast_capacity: lookup("BROADCAST_CAPACITY")
                .and_then(|c| c.parse().ok())
                .filter(|c| *c > 0)
                .unwrap_or(defaults.broadcast_capacity),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            database_path: None,
            lifecycle_policy: LifecyclePolicy::Strict,
            broadcast_capacity: realtime::DEFAULT_CAPACITY,
        }
    }
}
