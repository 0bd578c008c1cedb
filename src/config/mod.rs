// Configuration module entry point
// Command-line parsing and layered settings loading

mod state;
mod types;

use clap::Parser;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{HlsSettings, LoggingSettings, PerformanceSettings, ServerSettings, Settings};

/// Command-line options
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "hls_webserver")]
#[command(author, version, about = "Static web server with HLS-aware MIME types, CORS and path translation", long_about = None)]
pub struct Cli {
    /// Port to listen on (default: 8080)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Base directory to serve (default: current directory)
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Worker thread count (default: CPU cores)
    #[arg(long)]
    pub workers: Option<usize>,
}

impl Settings {
    /// Load settings: built-in defaults, then `HLSERVE_*` environment
    /// variables, then command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("hls.deploy_dir", "/var/www/hls")?
            .add_source(config::Environment::with_prefix("HLSERVE").separator("__"));

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(ref directory) = cli.directory {
            builder = builder.set_override("server.root", directory.as_str())?;
        }
        if let Some(workers) = cli.workers {
            builder = builder.set_override("server.workers", workers as u64)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
