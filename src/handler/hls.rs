//! HLS path translation module
//!
//! Requests under `/hls/` are resolved against an ordered list of candidate
//! directories instead of the web root, so streaming output can live outside
//! the served bundle. The first candidate holding the file wins:
//!
//! 1. `<web-root>/hls` (real directory or symlink)
//! 2. the configured deployment directory (default `/var/www/hls`)
//! 3. `<web-root>/hls_output`
//! 4. `<parent-of-web-root>/hls_output`
//!
//! Only a flat filename lookup is supported; nothing after the prefix is
//! interpreted as routing. Candidates are probed on every request - segment
//! directories appear and disappear while encoders run.

use std::path::{Path, PathBuf};

use crate::logger;

/// Reserved URL prefix for translated lookups
pub const HLS_PREFIX: &str = "/hls/";

/// Resolve a request path to a file in one of the candidate directories.
///
/// Returns `None` for paths outside the `/hls/` prefix and for filenames no
/// candidate holds, in which case the caller falls back to default web-root
/// resolution (and from there to the standard 404).
///
/// A match inside the web-root subtree is re-anchored onto the web root;
/// a match outside it is returned as the absolute candidate path.
pub fn translate(web_root: &Path, deploy_dir: &Path, path: &str) -> Option<PathBuf> {
    let filename = path.strip_prefix(HLS_PREFIX)?;
    if filename.is_empty() {
        return None;
    }

    for candidate in candidate_dirs(web_root, deploy_dir) {
        let file = candidate.join(filename);
        if !file.is_file() {
            continue;
        }

        // The file exists, so both paths canonicalize unless racing a delete.
        let Ok(resolved) = file.canonicalize() else {
            continue;
        };
        let Ok(candidate_canonical) = candidate.canonicalize() else {
            continue;
        };

        // Lookups never escape the enumerated candidate directories.
        if !resolved.starts_with(&candidate_canonical) {
            logger::log_warning(&format!(
                "HLS traversal attempt blocked: {} -> {}",
                path,
                resolved.display()
            ));
            continue;
        }

        return Some(anchor_to_web_root(web_root, path, resolved));
    }

    None
}

/// Candidate directories in priority order, rebuilt per request.
fn candidate_dirs(web_root: &Path, deploy_dir: &Path) -> [PathBuf; 4] {
    [
        web_root.join("hls"),
        deploy_dir.to_path_buf(),
        web_root.join("hls_output"),
        web_root
            .parent()
            .unwrap_or(web_root)
            .join("hls_output"),
    ]
}

/// Express a matched file relative to the web root where possible.
///
/// Files outside the web-root subtree keep their absolute path; that case is
/// logged rather than silently substituted so misplaced output directories
/// show up in the error log.
fn anchor_to_web_root(web_root: &Path, request_path: &str, resolved: PathBuf) -> PathBuf {
    match resolved.strip_prefix(web_root) {
        Ok(relative) => web_root.join(relative),
        Err(_) => {
            logger::log_warning(&format!(
                "HLS file for {} outside web root, serving absolute path: {}",
                request_path,
                resolved.display()
            ));
            resolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Project tree: `<parent>/web` as web root, plus sibling and deployment
    /// candidate directories.
    struct Fixture {
        _parent: TempDir,
        _deploy: TempDir,
        web_root: PathBuf,
        deploy_dir: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let parent = TempDir::new().unwrap();
            let deploy = TempDir::new().unwrap();
            let web_root = parent.path().join("web");
            fs::create_dir(&web_root).unwrap();
            let web_root = web_root.canonicalize().unwrap();
            let deploy_dir = deploy.path().canonicalize().unwrap();
            Self {
                _parent: parent,
                _deploy: deploy,
                web_root,
                deploy_dir,
            }
        }

        fn add(&self, dir: &Path, name: &str) {
            fs::create_dir_all(dir).unwrap();
            fs::write(dir.join(name), b"segment-data").unwrap();
        }

        fn translate(&self, path: &str) -> Option<PathBuf> {
            translate(&self.web_root, &self.deploy_dir, path)
        }
    }

    #[test]
    fn test_non_hls_path_defers() {
        let fx = Fixture::new();
        assert_eq!(fx.translate("/index.html"), None);
        assert_eq!(fx.translate("/hls"), None);
        assert_eq!(fx.translate("/hls/"), None);
    }

    #[test]
    fn test_web_root_hls_wins_over_all() {
        let fx = Fixture::new();
        let parent = fx.web_root.parent().unwrap().to_path_buf();
        fx.add(&fx.web_root.join("hls"), "stream.m3u8");
        fx.add(&fx.deploy_dir, "stream.m3u8");
        fx.add(&fx.web_root.join("hls_output"), "stream.m3u8");
        fx.add(&parent.join("hls_output"), "stream.m3u8");

        let resolved = fx.translate("/hls/stream.m3u8").unwrap();
        assert_eq!(resolved, fx.web_root.join("hls").join("stream.m3u8"));
    }

    #[test]
    fn test_deploy_dir_beats_output_dirs() {
        let fx = Fixture::new();
        let parent = fx.web_root.parent().unwrap().to_path_buf();
        fx.add(&fx.deploy_dir, "seg0001.ts");
        fx.add(&fx.web_root.join("hls_output"), "seg0001.ts");
        fx.add(&parent.join("hls_output"), "seg0001.ts");

        let resolved = fx.translate("/hls/seg0001.ts").unwrap();
        assert_eq!(resolved, fx.deploy_dir.join("seg0001.ts"));
    }

    #[test]
    fn test_missing_candidates_skipped() {
        let fx = Fixture::new();
        // Only the third candidate exists.
        fx.add(&fx.web_root.join("hls_output"), "seg0002.ts");

        let resolved = fx.translate("/hls/seg0002.ts").unwrap();
        assert_eq!(resolved, fx.web_root.join("hls_output").join("seg0002.ts"));
    }

    #[test]
    fn test_parent_output_dir_is_last_resort() {
        let fx = Fixture::new();
        let parent = fx.web_root.parent().unwrap().to_path_buf();
        fx.add(&parent.join("hls_output"), "seg0003.ts");

        let resolved = fx.translate("/hls/seg0003.ts").unwrap();
        assert_eq!(resolved, parent.join("hls_output").join("seg0003.ts"));
    }

    #[test]
    fn test_no_candidate_match_returns_none() {
        let fx = Fixture::new();
        fx.add(&fx.web_root.join("hls"), "present.ts");
        assert_eq!(fx.translate("/hls/missing.ts"), None);
    }

    #[test]
    fn test_match_inside_root_is_anchored() {
        let fx = Fixture::new();
        fx.add(&fx.web_root.join("hls"), "stream.m3u8");

        let resolved = fx.translate("/hls/stream.m3u8").unwrap();
        assert!(resolved.starts_with(&fx.web_root));
    }

    #[test]
    fn test_match_outside_root_stays_absolute() {
        let fx = Fixture::new();
        fx.add(&fx.deploy_dir, "stream.m3u8");

        let resolved = fx.translate("/hls/stream.m3u8").unwrap();
        assert!(resolved.is_absolute());
        assert!(!resolved.starts_with(&fx.web_root));
        assert_eq!(resolved, fx.deploy_dir.join("stream.m3u8"));
    }

    #[test]
    fn test_directory_match_rejected() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.web_root.join("hls").join("nested")).unwrap();
        // A directory is not a regular file and must not resolve.
        assert_eq!(fx.translate("/hls/nested"), None);
    }

    #[test]
    fn test_traversal_out_of_candidates_blocked() {
        let fx = Fixture::new();
        let parent = fx.web_root.parent().unwrap().to_path_buf();
        fs::create_dir_all(fx.web_root.join("hls")).unwrap();
        fs::write(parent.join("secret.txt"), b"keep-out").unwrap();

        // Joins to an existing file, but outside every candidate directory.
        assert_eq!(fx.translate("/hls/../../secret.txt"), None);
    }
}
