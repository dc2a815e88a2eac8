//! Configuration loading.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `config.toml` next to the binary, and `SERVER_`-prefixed environment
//! variables (`SERVER_SPA__ASSET_ROOT=dist` sets `spa.asset_root`).
//! Later layers override earlier ones.

mod state;
mod types;

pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SpaConfig};

use std::net::SocketAddr;

impl Config {
    /// Load from `config.toml` in the working directory, if present.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("spa.asset_root", "static")?
            .set_default("spa.fallback_file", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// The address to bind. The configured host must be an IP address,
    /// not a hostname.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        address
            .parse()
            .map_err(|e| format!("invalid listen address '{address}': {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: None,
            },
            spa: SpaConfig {
                asset_root: "static".to_string(),
                fallback_file: "index.html".to_string(),
                index_files: vec!["index.html".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
        }
    }

    #[test]
    fn test_socket_addr_from_ip_and_port() {
        let config = base_config();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn test_socket_addr_rejects_hostnames() {
        let mut config = base_config();
        config.server.host = "localhost".to_string();
        let err = config.socket_addr().unwrap_err();
        assert!(err.contains("localhost:8000"));
    }
}
