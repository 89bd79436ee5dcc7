//! A small REST API for recording and summarising a user's financial
//! transactions.
//!
//! Transactions are stored as documents in MongoDB, or in SQLite for local
//! development and tests. The HTTP surface lives under `/api/transactions`:
//!
//! - `GET /api/transactions/{user_id}` lists a user's transactions,
//! - `POST /api/transactions` records a new transaction,
//! - `DELETE /api/transactions/{transaction_id}` deletes a transaction,
//! - `GET /api/transactions/summary/{user_id}` summarises a user's transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod config;
mod db;
mod endpoints;
mod logging;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use config::{DATABASE_NAME_KEY, DATABASE_URI_KEY, DatabaseConfig};
pub use db::{Backend, ConnectionManager, DatabaseHandle};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    CategorySummary, NewTransaction, Transaction, TransactionId, TransactionSummary,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable was not set or was blank.
    ///
    /// This is a startup error, the server cannot run without it.
    #[error("the environment variable '{0}' must be set")]
    MissingEnvironmentVariable(&'static str),

    /// A configuration value was set but could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The database handle was requested before a connection was established.
    ///
    /// This indicates a startup ordering bug: [ConnectionManager::connect]
    /// must complete before requests are served.
    #[error("database not initialized, call connect() first")]
    Uninitialized,

    /// The client sent a request body or parameter that could not be used.
    ///
    /// The string is safe to show to the client.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(#[from] rusqlite::Error),

    /// An unhandled/unexpected MongoDB error.
    #[error("an unexpected MongoDB error occurred: {0}")]
    MongoError(#[from] mongodb::error::Error),

    /// A stored document could not be converted into a domain type.
    #[error("could not read stored document: {0}")]
    CorruptDocument(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The HTTP server could not bind or failed while serving.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested resource could not be found.".to_owned(),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
