// Server module entry point
// Ties the validated root, the listener and the accept loop together

pub mod connection;
pub mod listener;

// Rust does not allow `loop` as a module name (keyword), so use server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, ServeConfig};
use crate::error::ServeError;

// Re-export commonly used types
pub use listener::create_listener;
pub use server_loop::serve_forever;

/// A bound static file server
///
/// Lifecycle: [`Server::bind`] is the starting phase (resolve root, bind
/// socket), [`Server::serve_forever`] is the serving phase, which never
/// returns.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Validate the root directory, then bind the listening socket
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &ServeConfig) -> Result<Self, ServeError> {
        let state = AppState::new(config)?;
        let addr = config.get_socket_addr().map_err(ServeError::Address)?;
        let listener =
            create_listener(addr).map_err(|source| ServeError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Canonical root directory requests are resolved against
    pub fn root(&self) -> &Path {
        &self.state.root
    }

    pub async fn serve_forever(self) {
        serve_forever(self.listener, self.state).await;
    }
}
