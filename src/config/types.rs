// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// File store configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// Flat directory holding every stored file (created at startup)
    pub upload_root: String,
    /// URL path listing the store; file requests live under `<collection_path>/`
    pub collection_path: String,
    /// HTML page served for root-like requests
    pub index_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: "api/file".to_string(),
            collection_path: "/api/file".to_string(),
            index_file: "html/index.html".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration (all durations in seconds)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    /// Zero disables HTTP keep-alive
    pub keep_alive_timeout: u64,
    /// Whole-connection deadline is `max(read_timeout, write_timeout)`; zero disables it
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    /// How long shutdown waits for in-flight connections
    #[serde(default = "default_shutdown_grace_period")]
    pub shutdown_grace_period: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_shutdown_grace_period() -> u64 {
    10
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 300,
            write_timeout: 300,
            max_connections: None,
            shutdown_grace_period: default_shutdown_grace_period(),
        }
    }
}
