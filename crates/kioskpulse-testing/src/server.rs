//! Server spawn helper for integration tests.

use std::net::SocketAddr;

use kioskpulse_api::{create_router, AppState};

/// Binds the real router on an ephemeral port and serves it in the
/// background.
///
/// Returns the bound address; the server task lives until the test runtime
/// shuts down.
///
/// # Panics
///
/// Panics if the listener cannot bind, which only happens when the host has
/// no loopback interface available.
pub async fn spawn_server(state: AppState) -> SocketAddr {
    let listener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.expect("Test server failed");
    });

    addr
}
