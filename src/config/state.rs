// Application state module
// Immutable per-process state shared by all connections

use std::io;
use std::path::{Path, PathBuf};

use super::types::Settings;

/// Application state
///
/// The web root is resolved to an absolute path once at startup; request
/// handling never consults the process working directory. Everything here is
/// read-only after construction, so handlers run concurrently without locks.
pub struct AppState {
    pub settings: Settings,
    /// Canonicalized web root all default resolution is anchored to
    pub web_root: PathBuf,
    /// Fixed deployment candidate for `/hls/` translation
    pub hls_deploy_dir: PathBuf,
}

impl AppState {
    /// Build state from loaded settings.
    ///
    /// Fails when the configured web root does not exist or is unreadable;
    /// serving from a phantom directory would turn every request into a 404.
    pub fn new(settings: Settings) -> io::Result<Self> {
        let web_root = Path::new(&settings.server.root).canonicalize()?;
        let hls_deploy_dir = PathBuf::from(&settings.hls.deploy_dir);

        Ok(Self {
            settings,
            web_root,
            hls_deploy_dir,
        })
    }
}
