// Signal handling module
//
// SIGTERM and SIGINT trigger a graceful stop: the accept loop is notified,
// a shutdown notice is printed, and the process exits with status 0.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal listener (Unix)
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.notify_waiters();
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            println!("\n[SIGNAL] SIGTERM received, shutting down...");
        }
        _ = sigint.recv() => {
            println!("\n[SIGNAL] SIGINT received (Ctrl+C), shutting down...");
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Ok(()) = tokio::signal::ctrl_c().await {
        println!("\n[SIGNAL] Ctrl+C received, shutting down...");
    }
}
