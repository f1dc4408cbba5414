// Configuration types module
// Defines the server configuration data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` means all IPv4 interfaces
    pub host: String,
    pub port: u16,
    /// Directory request paths are resolved against
    pub root: PathBuf,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Write one line per request
    pub access_log: bool,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<PathBuf>,
}
