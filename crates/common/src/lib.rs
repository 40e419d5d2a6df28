//! Common types and utilities for the example service

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, LogConfig, LogFormat, ServerConfig};
pub use error::{Error, Result};
