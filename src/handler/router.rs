//! Request dispatch module
//!
//! Entry point for HTTP request processing: method gating, index-document
//! rewriting, HLS translation, and final header policy application.

use crate::config::AppState;
use crate::handler::{hls, static_files};
use crate::http::{self, headers};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context carried through resolution and response assembly
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
///
/// Every response, error or not, passes through `headers::finalize` so the
/// CORS and streaming cache policy hold on all status codes.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let access_log = state.settings.logging.access_log;

    if access_log {
        logger::log_request(method, uri, req.version());
    }

    let path = normalize_path(uri.path());

    let mut response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path,
                is_head: *method == Method::HEAD,
                if_none_match: header_value(&req, "if-none-match"),
                range_header: header_value(&req, "range"),
                access_log,
            };
            resolve_and_serve(&ctx, &state).await
        }
    };

    headers::finalize(path, &mut response);
    Ok(response)
}

/// Rewrite empty and trailing-slash paths to the index document.
fn normalize_path(path: &str) -> &str {
    if path.is_empty() || path.ends_with('/') {
        "/index.html"
    } else {
        path
    }
}

/// Gate on HTTP method: `None` lets GET/HEAD continue, anything else is
/// answered immediately (OPTIONS preflight is terminal).
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Try HLS translation first, then default web-root resolution.
async fn resolve_and_serve(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    if let Some(resolved) = hls::translate(&state.web_root, &state.hls_deploy_dir, ctx.path) {
        return static_files::serve_resolved(ctx, &resolved).await;
    }

    static_files::serve_from_root(ctx, &state.web_root).await
}
