//! The state shared by the transaction endpoints.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, DatabaseHandle, Error, db::ConnectionManager};

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The manager holding the database handle.
    pub connection: Arc<ConnectionManager>,
}

impl TransactionState {
    /// The database handle, or [Error::Uninitialized] if the server was
    /// started before connecting.
    pub fn database(&self) -> Result<&DatabaseHandle, Error> {
        self.connection.handle()
    }
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            connection: state.connection.clone(),
        }
    }
}
