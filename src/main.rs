//! Static asset server with a single-page-application fallback.
//!
//! Serves files from a configured asset root and answers every path
//! that does not map to one with the fallback document, so client-side
//! routers survive deep links and full page reloads.

mod config;
mod handler;
mod http;
mod logger;
mod server;

use std::sync::Arc;

use tokio::sync::Notify;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime.worker_threads(workers);
    }

    runtime.build()?.block_on(run_server(cfg))
}

async fn run_server(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener =
        server::bind_listener(addr).map_err(|e| format!("failed to bind {addr}: {e}"))?;

    let state = Arc::new(config::AppState::new(&cfg));
    let shutdown = Arc::new(Notify::new());
    server::signal::spawn_shutdown_listener(Arc::clone(&shutdown));

    logger::log_server_start(&addr, &cfg);

    server::serve(listener, state, shutdown).await?;
    Ok(())
}
