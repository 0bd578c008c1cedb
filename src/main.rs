use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = config::Cli::parse();
    let settings = config::Settings::load(&cli)?;
    logger::init(&settings)?;

    // Build the Tokio runtime, honoring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = settings.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(settings))
}

async fn async_main(settings: config::Settings) -> Result<(), Box<dyn std::error::Error>> {
    let addr = settings.socket_addr()?;
    let state = Arc::new(config::AppState::new(settings)?);

    let listener = server::listener::create_listener(addr)?;

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    logger::log_server_start(&addr, &state.settings, &state.web_root);

    server::run(listener, state, shutdown).await?;

    // Operator-initiated stop is a clean exit
    logger::log_server_stop();
    Ok(())
}
