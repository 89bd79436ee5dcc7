//! Defines the endpoint for listing a user's transactions.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::transaction::state::TransactionState;

/// A route handler for getting all of a user's transactions.
///
/// Responds with a JSON array, which is empty if the user has no transactions.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Path(user_id): Path<String>,
) -> Response {
    let database = match state.database() {
        Ok(database) => database,
        Err(error) => return error.into_response(),
    };

    match database.get_transactions_by_user(&user_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not get transactions for user {user_id}: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        Transaction,
        endpoints::{TRANSACTION, TRANSACTIONS_API, format_endpoint},
        test_utils::{get_test_server, get_unconnected_test_server},
    };

    #[tokio::test]
    async fn lists_users_transactions() {
        let server = get_test_server().await;
        let mut created = Vec::new();
        for (user_id, amount) in [("u1", 50.0), ("u2", 10.0), ("u1", 30.0)] {
            let transaction = server
                .post(TRANSACTIONS_API)
                .json(&json!({
                    "userId": user_id,
                    "amount": amount,
                    "category": "food",
                    "date": "2024-01-01",
                }))
                .await
                .json::<Transaction>();
            created.push(transaction);
        }

        let response = server.get(&format_endpoint(TRANSACTION, "u1")).await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Transaction>>();
        assert_eq!(transactions, vec![created[0].clone(), created[2].clone()]);
    }

    #[tokio::test]
    async fn user_without_transactions_gets_empty_array() {
        let server = get_test_server().await;

        let response = server.get(&format_endpoint(TRANSACTION, "nobody")).await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn unconnected_database_is_internal_server_error() {
        let server = get_unconnected_test_server();

        let response = server.get(&format_endpoint(TRANSACTION, "u1")).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Internal server error" }));
    }
}
