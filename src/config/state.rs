// Application state module
// Holds the read-only values every request handler needs

use std::path::PathBuf;

use super::types::ServeConfig;
use crate::error::ServeError;

/// Application state, built once before serving and never mutated
#[derive(Debug, Clone)]
pub struct AppState {
    /// Canonical root directory
    pub root: PathBuf,
    pub access_log: bool,
}

impl AppState {
    /// Resolve the configured root directory
    ///
    /// Fails when the directory does not exist or is not a directory, so a
    /// bad root aborts startup before any socket is bound.
    pub fn new(config: &ServeConfig) -> Result<Self, ServeError> {
        let configured = &config.server.root;
        let root = configured
            .canonicalize()
            .map_err(|source| ServeError::Root {
                path: configured.clone(),
                source,
            })?;

        if !root.is_dir() {
            return Err(ServeError::NotADirectory(root));
        }

        Ok(Self {
            root,
            access_log: config.logging.access_log,
        })
    }
}
