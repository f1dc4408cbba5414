//! Static file serving module
//!
//! Resolves request paths under the root directory and serves regular
//! files, index pages and directory listings.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files tried, in order, when a directory is requested
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Reasons a request path cannot be mapped under the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Undecodable percent-escapes or embedded NUL
    Malformed,
    /// `..` segments climb above the root
    Traversal,
}

/// Percent-decode a request path
pub fn decode_path(raw_path: &str) -> Result<String, PathError> {
    let decoded = urlencoding::decode(raw_path).map_err(|_| PathError::Malformed)?;
    if decoded.contains('\0') {
        return Err(PathError::Malformed);
    }
    Ok(decoded.into_owned())
}

/// Lexically normalize a decoded path into a path relative to the root
///
/// Empty and `.` segments are dropped and `..` removes the previous
/// segment. The filesystem is not consulted.
pub fn normalize_path(decoded: &str) -> Result<PathBuf, PathError> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(PathError::Traversal);
                }
            }
            name => segments.push(name),
        }
    }
    Ok(segments.into_iter().collect())
}

/// Serve a GET/HEAD request from `root`
///
/// `root` must already be canonical; see [`crate::config::AppState`].
pub async fn serve(ctx: &RequestContext, root: &Path) -> Response<Full<Bytes>> {
    let decoded = match decode_path(&ctx.path) {
        Ok(decoded) => decoded,
        Err(_) => {
            warn(ctx, &format!("Malformed request path: {}", ctx.path));
            return bad_request(ctx);
        }
    };

    let relative = match normalize_path(&decoded) {
        Ok(relative) => relative,
        Err(PathError::Traversal) => {
            warn(ctx, &format!("Path traversal attempt blocked: {}", ctx.path));
            return forbidden(ctx);
        }
        Err(PathError::Malformed) => return bad_request(ctx),
    };

    let file_path = root.join(relative);

    // Missing paths are common (404), no need to log them
    let Ok(canonical) = fs::canonicalize(&file_path).await else {
        return not_found(ctx);
    };
    if !canonical.starts_with(root) {
        warn_escape(ctx, &canonical);
        return forbidden(ctx);
    }

    let Ok(metadata) = fs::metadata(&file_path).await else {
        return not_found(ctx);
    };

    if metadata.is_dir() {
        return serve_directory(ctx, root, &file_path, &decoded).await;
    }

    // A trailing slash names a directory, never a file
    if ctx.path.ends_with('/') {
        return not_found(ctx);
    }

    serve_file(ctx, &file_path, &metadata).await
}

async fn serve_directory(
    ctx: &RequestContext,
    root: &Path,
    dir: &Path,
    display_path: &str,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = match &ctx.query {
            Some(query) => format!("{}/?{query}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    for index in INDEX_FILES {
        let candidate = dir.join(index);
        let Ok(canonical) = fs::canonicalize(&candidate).await else {
            continue;
        };
        // Index files obey the same containment rule as direct requests
        if !canonical.starts_with(root) {
            warn_escape(ctx, &canonical);
            return forbidden(ctx);
        }
        if let Ok(metadata) = fs::metadata(&candidate).await {
            if metadata.is_file() {
                return serve_file(ctx, &candidate, &metadata).await;
            }
        }
    }

    match listing::render(dir, display_path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            warn(ctx, &format!("Failed to list '{}': {e}", dir.display()));
            http::build_error_response(
                StatusCode::NOT_FOUND,
                "No permission to list directory",
                ctx.is_head,
            )
        }
    }
}

async fn serve_file(
    ctx: &RequestContext,
    path: &Path,
    metadata: &Metadata,
) -> Response<Full<Bytes>> {
    let modified = metadata.modified().ok();

    // If-None-Match takes precedence, and no ETags are issued
    if !ctx.has_if_none_match {
        if let Some(modified) = modified {
            if cache::is_not_modified(modified, ctx.if_modified_since.as_deref()) {
                return http::build_not_modified_response();
            }
        }
    }

    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            if ctx.access_log {
                logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            }
            return not_found(ctx);
        }
    };

    let last_modified = modified.map(cache::http_date);
    http::build_file_response(
        Bytes::from(content),
        mime::guess_type(path),
        last_modified.as_deref(),
        ctx.is_head,
    )
}

/// Per-request diagnostics are only written when request logging is on
fn warn(ctx: &RequestContext, message: &str) {
    if ctx.access_log {
        logger::log_warning(message);
    }
}

fn warn_escape(ctx: &RequestContext, canonical: &Path) {
    warn(
        ctx,
        &format!(
            "Path escapes root directory: {} -> {}",
            ctx.path,
            canonical.display()
        ),
    );
}

fn not_found(ctx: &RequestContext) -> Response<Full<Bytes>> {
    http::build_error_response(StatusCode::NOT_FOUND, "File not found", ctx.is_head)
}

fn forbidden(ctx: &RequestContext) -> Response<Full<Bytes>> {
    http::build_error_response(
        StatusCode::FORBIDDEN,
        "Path is outside the served directory",
        ctx.is_head,
    )
}

fn bad_request(ctx: &RequestContext) -> Response<Full<Bytes>> {
    http::build_error_response(StatusCode::BAD_REQUEST, "Bad request path", ctx.is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cache::http_date;
    use http_body_util::BodyExt;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn site() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        stdfs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
        stdfs::write(root.join("notes.txt"), "plain notes").unwrap();
        stdfs::create_dir(root.join("posts")).unwrap();
        stdfs::write(root.join("posts/first post.md"), "# First").unwrap();
        stdfs::create_dir(root.join("posts/drafts")).unwrap();
        (dir, root)
    }

    fn get(path: &str) -> RequestContext {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path.to_string(), None),
        };
        RequestContext {
            path,
            query,
            ..RequestContext::default()
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/").unwrap(), PathBuf::new());
        assert_eq!(normalize_path("/a/./b//c").unwrap(), PathBuf::from("a/b/c"));
        assert_eq!(normalize_path("/a/b/../c").unwrap(), PathBuf::from("a/c"));
        assert_eq!(normalize_path("/a/..").unwrap(), PathBuf::new());
        assert_eq!(normalize_path("/../etc/passwd"), Err(PathError::Traversal));
        assert_eq!(normalize_path("/a/../../b"), Err(PathError::Traversal));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/a%20b.txt").unwrap(), "/a b.txt");
        assert_eq!(decode_path("/caf%C3%A9").unwrap(), "/café");
        assert_eq!(decode_path("/%FF"), Err(PathError::Malformed));
        assert_eq!(decode_path("/a%00b"), Err(PathError::Malformed));
        assert_eq!(decode_path("/%2e%2e/x").unwrap(), "/../x");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (_dir, root) = site();
        let resp = serve(&get("/"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/html");
        assert!(resp.headers().contains_key("Last-Modified"));
        assert_eq!(body_string(resp).await, "<h1>home</h1>");
    }

    #[tokio::test]
    async fn test_regular_file() {
        let (_dir, root) = site();
        let resp = serve(&get("/notes.txt"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()["Content-Length"], "11");
        assert_eq!(body_string(resp).await, "plain notes");
    }

    #[tokio::test]
    async fn test_percent_encoded_name() {
        let (_dir, root) = site();
        let resp = serve(&get("/posts/first%20post.md"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "# First");
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, root) = site();
        let ctx = RequestContext {
            is_head: true,
            ..get("/notes.txt")
        };
        let resp = serve(&ctx, &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Length"], "11");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (_dir, root) = site();
        let resp = serve(&get("/missing.txt"), &root).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_on_file() {
        let (_dir, root) = site();
        let resp = serve(&get("/notes.txt/"), &root).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_redirect_keeps_query() {
        let (_dir, root) = site();
        let resp = serve(&get("/posts"), &root).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["Location"], "/posts/");

        let resp = serve(&get("/posts?sort=new"), &root).await;
        assert_eq!(resp.headers()["Location"], "/posts/?sort=new");
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let (_dir, root) = site();
        let resp = serve(&get("/posts/"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        let body = body_string(resp).await;
        assert!(body.contains("Directory listing for /posts/"));
        assert!(body.contains(r#"<a href="drafts/">drafts/</a>"#));
        assert!(body.contains(r#"<a href="first%20post.md">first post.md</a>"#));
    }

    #[tokio::test]
    async fn test_traversal_forbidden() {
        let (_dir, root) = site();
        let resp = serve(&get("/../../etc/passwd"), &root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let resp = serve(&get("/%2e%2e/secret"), &root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_inner_dotdot_stays_inside() {
        let (_dir, root) = site();
        let resp = serve(&get("/posts/../notes.txt"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_path() {
        let (_dir, root) = site();
        let resp = serve(&get("/%FF%FE"), &root).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_forbidden() {
        let (_dir, root) = site();
        let outside = tempfile::tempdir().unwrap();
        stdfs::write(outside.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("leak")).unwrap();

        let resp = serve(&get("/leak/secret.txt"), &root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_index_outside_root_forbidden() {
        let (_dir, root) = site();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.html");
        stdfs::write(&secret, "TOP SECRET").unwrap();
        std::os::unix::fs::symlink(&secret, root.join("posts/index.html")).unwrap();

        let resp = serve(&get("/posts/index.html"), &root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = serve(&get("/posts/"), &root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(!body_string(resp).await.contains("TOP SECRET"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_index_inside_root_served() {
        let (_dir, root) = site();
        std::os::unix::fs::symlink(root.join("notes.txt"), root.join("posts/index.html")).unwrap();

        let resp = serve(&get("/posts/"), &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "plain notes");
    }

    #[tokio::test]
    async fn test_if_modified_since() {
        let (_dir, root) = site();
        let mtime = stdfs::metadata(root.join("notes.txt"))
            .unwrap()
            .modified()
            .unwrap();

        let ctx = RequestContext {
            if_modified_since: Some(http_date(mtime)),
            ..get("/notes.txt")
        };
        let resp = serve(&ctx, &root).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

        // If-None-Match disables the date check
        let ctx = RequestContext {
            if_modified_since: Some(http_date(mtime)),
            has_if_none_match: true,
            ..get("/notes.txt")
        };
        let resp = serve(&ctx, &root).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let ctx = RequestContext {
            if_modified_since: Some("Thu, 01 Jan 1970 00:00:00 GMT".to_string()),
            ..get("/notes.txt")
        };
        let resp = serve(&ctx, &root).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
