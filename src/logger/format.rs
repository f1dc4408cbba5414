//! Access log format module
//!
//! Renders one line per request in the classic
//! `host - - [date] "request line" status size` layout.

use chrono::{DateTime, Local};
use hyper::body::Body;
use hyper::{Request, Response, Version};
use std::net::SocketAddr;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI including the query string
    pub uri: String,
    /// HTTP version as sent on the request line, e.g. `HTTP/1.1`
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes, when known
    pub body_bytes: Option<u64>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            http_version: "HTTP/1.1".to_string(),
            status: 200,
            body_bytes: None,
        }
    }

    /// Capture the request side of the entry
    pub fn from_request<B>(peer_addr: SocketAddr, req: &Request<B>) -> Self {
        let mut entry = Self::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().to_string(),
        );
        entry.http_version = version_label(req.version()).to_string();
        entry
    }

    /// Fill in the response side of the entry
    pub fn record_response<B: Body>(&mut self, resp: &Response<B>) {
        self.status = resp.status().as_u16();
        self.body_bytes = resp.body().size_hint().exact();
    }

    /// Format the entry as a single log line
    pub fn format(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} {}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            self.method,
            self.uri,
            self.http_version,
            self.status,
            self.body_bytes
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        )
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
