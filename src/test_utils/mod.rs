#![allow(missing_docs)]

use axum_test::TestServer;

use crate::{AppState, DatabaseHandle, build_router, config::DatabaseConfig, db::ConnectionManager};

/// An app state backed by a connected, empty in-memory SQLite database.
pub(crate) async fn get_test_state() -> AppState {
    let manager = ConnectionManager::new(DatabaseConfig::new("sqlite::memory:", "test"));
    manager
        .connect()
        .await
        .expect("Could not connect to the in-memory database.");

    AppState::new(manager)
}

pub(crate) async fn get_test_server() -> TestServer {
    get_test_server_with_state().await.0
}

pub(crate) async fn get_test_server_with_state() -> (TestServer, AppState) {
    let state = get_test_state().await;
    let server =
        TestServer::new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

/// A server whose connection manager never connected.
pub(crate) fn get_unconnected_test_server() -> TestServer {
    let state = AppState::new(ConnectionManager::new(DatabaseConfig::new(
        "sqlite::memory:",
        "test",
    )));

    TestServer::new(build_router(state)).expect("Could not create test server.")
}

/// Count every stored transaction, regardless of user.
#[track_caller]
pub(crate) fn count_transactions(state: &AppState) -> i64 {
    match state.connection.handle() {
        Ok(DatabaseHandle::Sqlite(connection)) => connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM \"transaction\"", [], |row| row.get(0))
            .unwrap(),
        _ => panic!("test state must be connected to SQLite"),
    }
}
