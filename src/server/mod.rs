// Server module entry point
// Listener creation and the accept loop

pub mod connection;
pub mod listener;

pub use listener::bind_listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Accept connections until the process is torn down.
///
/// A failed accept is logged and the loop continues; there is no graceful
/// shutdown path.
pub async fn run(
    listener: TcpListener,
    cfg: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => connection::accept_connection(stream, peer_addr, &cfg),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
