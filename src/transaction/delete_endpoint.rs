//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{Error, transaction::state::TransactionState};

/// A route handler for deleting a transaction by its ID.
///
/// Responds with 200 OK and a confirmation message, or 404 Not Found if no
/// transaction has the ID.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let database = match state.database() {
        Ok(database) => database,
        Err(error) => return error.into_response(),
    };

    match database.delete_transaction(&transaction_id).await {
        Ok(0) => Error::NotFound.into_response(),
        Ok(_) => Json(json!({
            "message": "Transaction deleted",
            "id": transaction_id,
        }))
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
