//! Per-connection HTTP serving.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one accepted connection on its own task.
///
/// Every request on the connection goes through the request handler;
/// the whole connection is abandoned once the larger of the read and
/// write timeouts has elapsed.
pub fn spawn(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive = state.config.performance.keep_alive_timeout > 0;
        let timeout_secs = std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        );

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let connection = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, peer_addr, state).await }
            }),
        );

        // Zero for both timeouts means the connection may live forever.
        if timeout_secs == 0 {
            if let Err(e) = connection.await {
                logger::log_connection_error(&e);
            }
            return;
        }

        match tokio::time::timeout(Duration::from_secs(timeout_secs), connection).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => logger::log_connection_error(&e),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} dropped after {timeout_secs}s"
            )),
        }
    });
}
