//! Startup error taxonomy for the `cors-serve` binary
//!
//! Per-request failures never reach this type: they become HTTP error
//! responses in [`crate::handler`].

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Address(String),

    #[error("cannot serve directory '{}': {source}", .path.display())]
    Root { path: PathBuf, source: io::Error },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("failed to open access log: {0}")]
    Log(#[source] io::Error),
}
