//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::db::ConnectionManager;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The manager for the connection to the application database.
    ///
    /// Request handlers get the database handle from here. It must have
    /// connected before the server starts accepting requests.
    pub connection: Arc<ConnectionManager>,
}

impl AppState {
    /// Create a new [AppState] around an (ideally connected) [ConnectionManager].
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }
}
