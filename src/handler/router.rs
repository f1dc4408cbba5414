//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation and dispatching.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Raw (still percent-encoded) request path
    pub path: String,
    pub query: Option<String>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
    /// Per-request diagnostics go to the log only when request logging is on
    pub access_log: bool,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(ToString::to_string),
            is_head: parts.method == Method::HEAD,
            if_modified_since: parts
                .headers
                .get("if-modified-since")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
            has_if_none_match: parts.headers.contains_key("if-none-match"),
            access_log: false,
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body since static serving never reads it.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _) = req.into_parts();

    if let Some(resp) = check_http_method(&parts.method, state.access_log) {
        return Ok(resp);
    }

    let mut ctx = RequestContext::from_parts(&parts);
    ctx.access_log = state.access_log;
    Ok(static_files::serve(&ctx, &state.root).await)
}

/// Reject every method other than GET and HEAD with 501
fn check_http_method(method: &Method, access_log: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            if access_log {
                logger::log_warning(&format!("Unsupported method: {method}"));
            }
            Some(http::build_error_response(
                StatusCode::NOT_IMPLEMENTED,
                &format!("Unsupported method ('{method}')"),
                false,
            ))
        }
    }
}
