// Configuration types module
// Defines the settings structures deserialized from the layered sources

use serde::Deserialize;

/// Main settings structure
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub performance: PerformanceSettings,
    pub hls: HlsSettings,
}

/// Server settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Web root directory to serve
    pub root: String,
    pub workers: Option<usize>,
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub access_log: bool,
    /// Access log file path (stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    pub error_log_file: Option<String>,
}

/// Performance settings
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceSettings {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HLS path-translation settings
#[derive(Debug, Deserialize, Clone)]
pub struct HlsSettings {
    /// Fixed deployment candidate directory, probed after `<web-root>/hls`
    pub deploy_dir: String,
}
