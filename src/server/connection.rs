// Connection handling module
// Serves one accepted TCP connection per spawned task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Accept a connection and serve it on its own task.
///
/// Requests on the connection are handled without blocking the accept
/// loop; serve errors are logged and end only this connection.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, cfg: &Arc<Config>) {
    let cfg = Arc::clone(cfg);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let cfg = Arc::clone(&cfg);
                async move { handler::handle_request(req, peer_addr, cfg).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
