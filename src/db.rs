//! Database connection stub
//!
//! Placeholder for a real backing store. Callers await [`connect`] before
//! running logic that expects a database to be ready.

use std::time::Duration;

use tokio::time::sleep;

/// Message the simulated handshake resolves with.
pub const CONNECTED_MESSAGE: &str = "Connected to the database.";

/// Duration of the simulated handshake.
const CONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Simulate establishing a database connection.
///
/// Resolves after about one second with a fixed confirmation message. No
/// real connection is made and there is no failure path.
pub async fn connect() -> &'static str {
    sleep(CONNECT_DELAY).await;
    CONNECTED_MESSAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn resolves_with_fixed_message_after_delay() {
        let start = Instant::now();
        let message = connect().await;
        assert_eq!(message, CONNECTED_MESSAGE);
        assert_eq!(start.elapsed(), CONNECT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_connections_resolve_independently() {
        let handles: Vec<_> = (0..10).map(|_| tokio::spawn(connect())).collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), CONNECTED_MESSAGE);
        }
    }
}
