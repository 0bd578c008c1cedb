//! Static file serving module
//!
//! Loads files for both default web-root resolution and translator-resolved
//! HLS paths, then assembles the response: conditional request check, range
//! handling, full body.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeParseResult};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Index document served for directory paths
const INDEX_FILE: &str = "index.html";

/// Serve a request path resolved against the web root.
///
/// Directory traversal is rejected by canonicalizing and requiring the
/// result to stay under the root. A directory path falls back to its index
/// document.
pub async fn serve_from_root(ctx: &RequestContext<'_>, web_root: &Path) -> Response<Full<Bytes>> {
    match load_from_root(web_root, ctx.path).await {
        Some((content, content_type)) => {
            if ctx.access_log {
                logger::log_response(content.len());
            }
            build_static_response(&content, content_type, ctx)
        }
        None => http::build_404_response(),
    }
}

/// Serve a file the HLS translator already resolved.
///
/// Containment was enforced during translation, so the file is read
/// directly; candidate directories may sit outside the web root.
pub async fn serve_resolved(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    match load_file(file_path).await {
        Some((content, content_type)) => {
            if ctx.access_log {
                logger::log_response(content.len());
            }
            build_static_response(&content, content_type, ctx)
        }
        None => http::build_404_response(),
    }
}

/// Load a file under the web root with the traversal guard applied.
async fn load_from_root(web_root: &Path, path: &str) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and strip traversal sequences
    let clean_path = path.trim_start_matches('/').replace("..", "");

    let mut file_path = web_root.join(&clean_path);

    let web_root_canonical = match web_root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Web root not found or inaccessible '{}': {e}",
                web_root.display()
            ));
            return None;
        }
    };

    // Directory paths fall back to the index document
    if file_path.is_dir() || clean_path.is_empty() {
        file_path = file_path.join(INDEX_FILE);
    }

    // Not found is the common 404 case, not worth a warning
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&web_root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    read_with_type(&file_path).await
}

/// Load a translator-resolved file directly.
async fn load_file(file_path: &Path) -> Option<(Vec<u8>, &'static str)> {
    read_with_type(file_path).await
}

async fn read_with_type(file_path: &Path) -> Option<(Vec<u8>, &'static str)> {
    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                logger::log_error(&format!(
                    "Failed to read file '{}': {e}",
                    file_path.display()
                ));
            }
            return None;
        }
    };

    let content_type = mime::content_type_for(file_path);
    Some((content, content_type))
}

/// Assemble the file response: conditional check, then range, then full body.
fn build_static_response(
    data: &[u8],
    content_type: &str,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::etag_for(data);
    let total_size = data.len();

    if cache::matches_if_none_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeParseResult::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);

            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };

            http::response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                ctx.is_head,
            )
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(total_size),
        RangeParseResult::None => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            http::response::build_file_response(body, content_type, &etag, ctx.is_head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            range_header: None,
            access_log: false,
        }
    }

    fn web_root() -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std_fs::write(root.join("index.html"), b"<html>home</html>").unwrap();
        std_fs::write(root.join("app.js"), b"console.log(1);").unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let (_dir, root) = web_root();
        let response = serve_from_root(&ctx("/app.js"), &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let (_dir, root) = web_root();
        let response = serve_from_root(&ctx("/nope.png"), &root).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_index_document_for_directory() {
        let (_dir, root) = web_root();
        std_fs::create_dir(root.join("docs")).unwrap();
        std_fs::write(root.join("docs").join("index.html"), b"docs").unwrap();

        let response = serve_from_root(&ctx("/docs"), &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let (_dir, root) = web_root();
        let outside = root.parent().unwrap().join("outside.txt");
        std_fs::write(&outside, b"secret").unwrap();

        let response = serve_from_root(&ctx("/../outside.txt"), &root).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let (_dir, root) = web_root();
        let mut head_ctx = ctx("/app.js");
        head_ctx.is_head = true;

        let response = serve_from_root(&head_ctx, &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Length").unwrap(), "15");
    }

    #[tokio::test]
    async fn test_range_request_yields_partial() {
        let (_dir, root) = web_root();
        let mut range_ctx = ctx("/app.js");
        range_ctx.range_header = Some("bytes=0-3".to_string());

        let response = serve_from_root(&range_ctx, &root).await;
        assert_eq!(response.status(), 206);
        assert_eq!(
            response.headers().get("Content-Range").unwrap(),
            "bytes 0-3/15"
        );
    }

    #[tokio::test]
    async fn test_unsatisfiable_range_yields_416() {
        let (_dir, root) = web_root();
        let mut range_ctx = ctx("/app.js");
        range_ctx.range_header = Some("bytes=500-".to_string());

        let response = serve_from_root(&range_ctx, &root).await;
        assert_eq!(response.status(), 416);
    }

    #[tokio::test]
    async fn test_etag_roundtrip_yields_304() {
        let (_dir, root) = web_root();
        let first = serve_from_root(&ctx("/app.js"), &root).await;
        let etag = first.headers().get("ETag").unwrap().to_str().unwrap().to_string();

        let mut cond_ctx = ctx("/app.js");
        cond_ctx.if_none_match = Some(etag);
        let second = serve_from_root(&cond_ctx, &root).await;
        assert_eq!(second.status(), 304);
    }

    #[tokio::test]
    async fn test_serve_resolved_outside_root() {
        let outside = TempDir::new().unwrap();
        let segment = outside.path().join("seg0001.ts");
        std_fs::write(&segment, b"mpegts-bytes").unwrap();

        let response = serve_resolved(&ctx("/hls/seg0001.ts"), &segment).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "video/mp2t");
    }
}
