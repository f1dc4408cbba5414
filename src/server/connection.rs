// Connection handling module
// Serves a single accepted TCP connection on its own task

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::http::Cors;
use crate::logger::{self, AccessLogEntry};

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Builds the request service, wrapped in the CORS middleware
/// 3. Serves the connection over HTTP/1.1
/// 4. Logs connection-level errors; they never stop the server
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
pub fn spawn_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = Cors::new(service_fn(move |req: Request<Incoming>| {
            let state = Arc::clone(&state);
            async move {
                let mut entry = state
                    .access_log
                    .then(|| AccessLogEntry::from_request(peer_addr, &req));

                let resp = handler::handle_request(req, state).await?;

                if let Some(entry) = entry.as_mut() {
                    entry.record_response(&resp);
                    logger::log_access(entry);
                }
                Ok::<_, Infallible>(resp)
            }
        }));

        let mut builder = http1::Builder::new();
        builder.title_case_headers(true);

        if let Err(err) = builder.serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}
