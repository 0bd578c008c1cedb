//! Conditional request support
//!
//! `ETag` generation and `If-None-Match` evaluation for static assets.
//! Streaming files carry a no-cache policy (see `http::headers`) but still
//! revalidate through the same `ETag` path.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute a quoted `ETag` for a file body using fast hashing.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Whether a client `If-None-Match` header matches the computed `ETag`.
///
/// Handles comma-separated candidate lists and the `*` wildcard. A match
/// means the cached copy is current and a 304 should be returned.
pub fn matches_if_none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|candidates| {
        candidates
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}
