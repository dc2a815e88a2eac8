//! Shutdown signal handling.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that fires `shutdown` once on SIGTERM or SIGINT.
#[cfg(unix)]
pub fn spawn_shutdown_listener(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            logger::log_error("Failed to register SIGTERM handler");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            logger::log_error("Failed to register SIGINT handler");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => logger::log_shutdown_signal("SIGTERM"),
            _ = sigint.recv() => logger::log_shutdown_signal("SIGINT"),
        }
        // notify_one stores a permit, so the accept loop sees the
        // shutdown even if it is not waiting at this exact moment.
        shutdown.notify_one();
    });
}

#[cfg(not(unix))]
pub fn spawn_shutdown_listener(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::log_shutdown_signal("Ctrl-C");
            shutdown.notify_one();
        }
    });
}
