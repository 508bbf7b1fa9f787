//! Shared test utilities for liftlevel-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use liftlevel_server::{AppState, LiftLevelServer, ServerConfig};
use tokio::net::TcpListener;

/// Creates a test server over an in-memory database, returns state and address
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    create_test_server_with_state(AppState::new_for_testing()).await
}

/// Creates a test server over the given state
#[allow(dead_code)]
pub async fn create_test_server_with_state(state: AppState) -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(state);
    let server = LiftLevelServer::new(ServerConfig::default(), Arc::clone(&state));
    let addr = spawn_server(server).await;

    (state, addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: LiftLevelServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
