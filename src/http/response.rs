//! HTTP response building module
//!
//! Provides builders for the responses the static file server produces,
//! decoupled from path resolution.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

/// Value of the `Server` header
pub const SERVER_NAME: &str = concat!("cors-serve/", env!("CARGO_PKG_VERSION"));

fn base_builder(status: StatusCode) -> Builder {
    Response::builder().status(status).header("Server", SERVER_NAME)
}

fn body_unless_head(data: Bytes, is_head: bool) -> Full<Bytes> {
    if is_head {
        Full::new(Bytes::new())
    } else {
        Full::new(data)
    }
}

/// Build 200 OK response for a regular file
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut builder = base_builder(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len());

    if let Some(last_modified) = last_modified {
        builder = builder.header("Last-Modified", last_modified);
    }

    builder
        .body(body_unless_head(data, is_head))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 OK HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();

    base_builder(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(body_unless_head(Bytes::from(content), is_head))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 Moved Permanently response
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    base_builder(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_not_modified_response() -> Response<Full<Bytes>> {
    base_builder(StatusCode::NOT_MODIFIED)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build an HTML error page for any 4xx/5xx status
///
/// `explain` is a short human-readable reason shown on the page.
pub fn build_error_response(
    status: StatusCode,
    explain: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let page = render_error_page(status, explain);

    base_builder(status)
        .header("Content-Type", "text/html;charset=utf-8")
        .header("Content-Length", page.len())
        .header("Connection", "close")
        .body(body_unless_head(Bytes::from(page), is_head))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = status;
            fallback
        })
}

fn render_error_page(status: StatusCode, explain: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    let explain = escape_html(explain);
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {explain}.</p>
        <p>Error code explanation: {code} - {reason}.</p>
    </body>
</html>
"#
    )
}

/// Escape text for inclusion in HTML element content
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_response_headers() {
        let resp = build_file_response(
            Bytes::from_static(b"hello"),
            "text/plain",
            Some("Thu, 01 Jan 1970 00:00:00 GMT"),
            false,
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(resp.headers()["Last-Modified"], "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(resp.headers()["Server"], SERVER_NAME);
        assert_eq!(body_string(resp).await, "hello");
    }

    #[tokio::test]
    async fn test_head_keeps_length_but_drops_body() {
        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain", None, true);
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert!(resp.headers().get("Last-Modified").is_none());
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_error_page() {
        let resp = build_error_response(StatusCode::NOT_FOUND, "File not found", false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], "text/html;charset=utf-8");
        assert_eq!(resp.headers()["Connection"], "close");
        let body = body_string(resp).await;
        assert!(body.contains("Error code: 404"));
        assert!(body.contains("Message: File not found."));
        assert!(body.contains("404 - Not Found"));
    }

    #[test]
    fn test_redirect() {
        let resp = build_redirect_response("/posts/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["Location"], "/posts/");
        assert_eq!(resp.headers()["Content-Length"], "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_html("\"quoted\""), "\"quoted\"");
    }
}
