//! Shared application state.

use std::path::{Path, PathBuf};

use super::types::Config;

/// Immutable state handed to every connection behind an `Arc`.
///
/// Request handlers never mutate anything here, so no locking is
/// involved on the request path.
pub struct AppState {
    pub config: Config,
    asset_root: PathBuf,
    fallback_file: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let asset_root = PathBuf::from(&config.spa.asset_root);
        let fallback_file = asset_root.join(&config.spa.fallback_file);
        Self {
            config: config.clone(),
            asset_root,
            fallback_file,
        }
    }

    /// Directory all served assets must live under.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Full path of the fallback document.
    pub fn fallback_file(&self) -> &Path {
        &self.fallback_file
    }

    /// File names probed, in order, when a directory is requested.
    pub fn index_files(&self) -> &[String] {
        &self.config.spa.index_files
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
