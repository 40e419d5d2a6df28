//! Application configuration

use std::env;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LogConfig,
    /// Values that failed to parse and fell back to their defaults. Logged
    /// once logging is up.
    pub warnings: Vec<String>,
}

impl Config {
    /// Load configuration from `.env` (if present) and environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Missing, blank or
    /// unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = read("HOST").unwrap_or(defaults.server.host);

        let port = match read("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "PORT must be a number, got {:?}; using {}",
                    raw, defaults.server.port
                ));
                defaults.server.port
            }),
            None => defaults.server.port,
        };

        let format = match read("LOG_FORMAT") {
            Some(raw) => raw.parse().unwrap_or_else(|e: Error| {
                warnings.push(format!("{}; using json", e));
                defaults.logging.format
            }),
            None => defaults.logging.format,
        };

        let filter = match read("RUST_LOG") {
            Some(raw) if EnvFilter::try_new(&raw).is_ok() => raw,
            Some(raw) => {
                warnings.push(format!(
                    "invalid RUST_LOG {:?}; using {}",
                    raw, defaults.logging.filter
                ));
                defaults.logging.filter
            }
            None => defaults.logging.filter,
        };

        Self {
            server: ServerConfig { host, port },
            logging: LogConfig { format, filter },
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            other => Err(Error::config(format!("unsupported LOG_FORMAT: {}", other))),
        }
    }
}
