//! Connection acceptance and lifecycle.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::bind_listener;

use std::io;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Accept connections until shutdown is signalled or the listener fails.
///
/// Aborted and reset connections are a client-side matter and only
/// logged; any other accept error is fatal and bubbles up so the
/// process can exit with a diagnostic.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> io::Result<()> {
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer_addr)) => {
                        connection::spawn(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) if matches!(
                        e.kind(),
                        io::ErrorKind::ConnectionAborted | io::ErrorKind::ConnectionReset
                    ) => {
                        logger::log_warning(&format!("Transient accept error: {e}"));
                    }
                    Err(e) => return Err(e),
                }
            }
            () = shutdown.notified() => {
                logger::log_info("Listener closed; shutting down");
                return Ok(());
            }
        }
    }
}
