//! Defines the endpoint for summarising a user's transactions.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::transaction::state::TransactionState;

/// A route handler for getting the totals of a user's transactions, overall and per category.
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    Path(user_id): Path<String>,
) -> Response {
    let database = match state.database() {
        Ok(database) => database,
        Err(error) => return error.into_response(),
    };

    match database.get_summary_by_user(&user_id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => {
            tracing::error!("Could not summarise transactions for user {user_id}: {error}");
            error.into_response()
        }
    }
}
