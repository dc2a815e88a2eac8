//! Configuration schema.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub spa: SpaConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads. Defaults to the number of CPU cores.
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Where assets live and what to serve when a path has none.
#[derive(Debug, Deserialize, Clone)]
pub struct SpaConfig {
    pub asset_root: String,
    /// Served, relative to `asset_root`, for every path that does not
    /// name an existing asset. This is what makes client-side routing
    /// work after a full page reload.
    pub fallback_file: String,
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file. Stdout when unset.
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file. Stderr when unset.
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Zero disables HTTP keep-alive.
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}
