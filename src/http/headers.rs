//! Response header policy module
//!
//! Appends the CORS header set to every response and enforces the no-cache
//! policy for HLS streaming files. Runs as the last step before a response is
//! handed back to the connection, so error responses are decorated too.

use hyper::header::{
    HeaderValue, ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, CACHE_CONTROL, EXPIRES, PRAGMA,
};
use hyper::Response;

/// Whether a request path names an HLS streaming file.
pub fn is_streaming_path(path: &str) -> bool {
    path.ends_with(".m3u8") || path.ends_with(".ts")
}

/// Apply the header policy for `path` to an outgoing response.
///
/// Every response gets the four CORS headers. Streaming paths additionally
/// get the no-cache triple (replacing whatever cache policy the builder
/// chose), and `.ts` segments advertise byte-range support so players can
/// issue partial fetches.
pub fn finalize<B>(path: &str, response: &mut Response<B>) {
    let headers = response.headers_mut();

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS, HEAD"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Range, Content-Type, Accept"),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Content-Length, Content-Range"),
    );

    if is_streaming_path(path) {
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));

        if path.ends_with(".ts") {
            headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        }
    }
}
