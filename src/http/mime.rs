//! MIME type resolution module
//!
//! Maps file extensions to Content-Type strings. A fixed override table takes
//! precedence so browsers never mis-identify bundle or streaming files; the
//! rest is delegated to `mime_guess`.

use std::path::Path;

/// Resolve the Content-Type for a file path.
///
/// The override table wins; extensions it does not cover fall through to
/// `mime_guess`, and extensions unknown to both yield
/// `application/octet-stream`. Matching is case-insensitive.
///
/// # Examples
/// ```
/// use hls_webserver::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("seg0001.ts")), "video/mp2t");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    if let Some(mapped) = override_table(ext.as_deref()) {
        return mapped;
    }

    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

/// Fixed extension overrides, charset suffixes included.
fn override_table(extension: Option<&str>) -> Option<&'static str> {
    let content_type = match extension? {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",

        // Streaming
        "m3u8" => "application/vnd.apple.mpegurl",
        "ts" => "video/mp2t",

        // Audio/Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",

        _ => return None,
    };
    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str) -> &'static str {
        content_type_for(Path::new(name))
    }

    #[test]
    fn test_override_table_exact() {
        assert_eq!(resolve("a.html"), "text/html; charset=utf-8");
        assert_eq!(resolve("a.htm"), "text/html; charset=utf-8");
        assert_eq!(resolve("a.js"), "application/javascript; charset=utf-8");
        assert_eq!(resolve("a.css"), "text/css; charset=utf-8");
        assert_eq!(resolve("a.json"), "application/json; charset=utf-8");
        assert_eq!(resolve("a.png"), "image/png");
        assert_eq!(resolve("a.jpg"), "image/jpeg");
        assert_eq!(resolve("a.jpeg"), "image/jpeg");
        assert_eq!(resolve("a.gif"), "image/gif");
        assert_eq!(resolve("a.svg"), "image/svg+xml");
        assert_eq!(resolve("a.ico"), "image/x-icon");
        assert_eq!(resolve("a.m3u8"), "application/vnd.apple.mpegurl");
        assert_eq!(resolve("a.ts"), "video/mp2t");
        assert_eq!(resolve("a.mp4"), "video/mp4");
        assert_eq!(resolve("a.webm"), "video/webm");
        assert_eq!(resolve("a.mp3"), "audio/mpeg");
        assert_eq!(resolve("a.wav"), "audio/wav");
        assert_eq!(resolve("a.txt"), "text/plain; charset=utf-8");
        assert_eq!(resolve("a.xml"), "application/xml; charset=utf-8");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("STREAM.M3U8"), "application/vnd.apple.mpegurl");
        assert_eq!(resolve("Index.HTML"), "text/html; charset=utf-8");
    }

    #[test]
    fn test_resolution_independent_of_existence() {
        // Resolution is purely extension-based; no such file exists.
        assert_eq!(resolve("/no/such/dir/clip.mp4"), "video/mp4");
    }

    #[test]
    fn test_fallback_guesser() {
        // Not in the override table; mime_guess decides.
        assert_eq!(resolve("doc.pdf"), "application/pdf");
        assert_eq!(resolve("archive.zip"), "application/zip");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(resolve("data.xyzzy"), "application/octet-stream");
        assert_eq!(resolve("noextension"), "application/octet-stream");
    }
}
