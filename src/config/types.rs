// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_SERVER_NAME: &str = "plainroute";
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_ACCESS_LOG_FORMAT: &str = "combined";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; CPU count when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
        }
    }
}

/// Static file fallback configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StaticFilesConfig {
    pub enabled: bool,
    pub public_dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
        }
    }
}

/// HTTP behaviour
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Value of the `Server` response header; empty disables it
    pub server_name: String,
    /// Largest request body read for a route, in bytes
    pub max_body_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: DEFAULT_ACCESS_LOG_FORMAT.to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Connection tuning
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { keep_alive: true }
    }
}

/// The three startup options an application is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub port: u16,
    pub static_enabled: bool,
    pub public_dir: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_enabled: true,
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
        }
    }
}
