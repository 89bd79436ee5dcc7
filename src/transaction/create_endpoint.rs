//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{
        core::{CreateTransactionRequest, NewTransaction},
        state::TransactionState,
    },
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 Created and the stored transaction, or 400 Bad Request
/// if the body is not valid JSON or is missing a field.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Error::Validation(rejection.body_text()).into_response(),
    };

    let transaction = match NewTransaction::try_from(request) {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };

    let database = match state.database() {
        Ok(database) => database,
        Err(error) => return error.into_response(),
    };

    match database.insert_transaction(transaction).await {
        Ok(transaction) => {
            tracing::debug!(
                "Created transaction {} for user {}",
                transaction.id,
                transaction.user_id
            );
            (StatusCode::CREATED, Json(transaction)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Transaction,
        endpoints::{TRANSACTION, TRANSACTIONS_API, format_endpoint},
        test_utils::{count_transactions, get_test_server, get_test_server_with_state},
    };

    #[tokio::test]
    async fn can_create_transaction() {
        let server = get_test_server().await;

        let response = server
            .post(TRANSACTIONS_API)
            .json(&json!({
                "userId": "u1",
                "amount": 50,
                "category": "food",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let transaction = response.json::<Transaction>();
        assert!(!transaction.id.is_empty());
        assert_eq!(transaction.user_id, "u1");
        assert_eq!(transaction.amount, 50.0);
        assert_eq!(transaction.category, "food");
        assert_eq!(transaction.date, date!(2024 - 01 - 01));

        let listed = server
            .get(&format_endpoint(TRANSACTION, "u1"))
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(listed, vec![transaction]);
    }

    #[tokio::test]
    async fn missing_user_id_is_rejected_and_not_stored() {
        let (server, state) = get_test_server_with_state().await;

        let response = server
            .post(TRANSACTIONS_API)
            .json(&json!({
                "amount": 50,
                "category": "food",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "userId is required" }));
        assert_eq!(count_transactions(&state), 0);
    }

    #[tokio::test]
    async fn blank_user_id_is_rejected_and_not_stored() {
        let (server, state) = get_test_server_with_state().await;

        server
            .post(TRANSACTIONS_API)
            .json(&json!({
                "userId": " ",
                "amount": 50,
                "category": "food",
                "date": "2024-01-01",
            }))
            .await
            .assert_status_bad_request();

        assert_eq!(count_transactions(&state), 0);
    }

    #[tokio::test]
    async fn malformed_fields_are_rejected() {
        let (server, state) = get_test_server_with_state().await;
        let bodies = [
            json!({ "userId": "u1", "amount": "fifty", "category": "food", "date": "2024-01-01" }),
            json!({ "userId": "u1", "amount": 50, "category": "food", "date": "yesterday" }),
            json!({ "userId": "u1", "amount": 50, "date": "2024-01-01" }),
            json!({ "userId": "u1", "category": "food", "date": "2024-01-01" }),
            json!([1, 2, 3]),
        ];

        for body in bodies {
            server
                .post(TRANSACTIONS_API)
                .json(&body)
                .await
                .assert_status_bad_request();
        }

        assert_eq!(count_transactions(&state), 0);
    }

    #[tokio::test]
    async fn body_that_is_not_json_is_rejected() {
        let server = get_test_server().await;

        server
            .post(TRANSACTIONS_API)
            .text("userId=u1")
            .await
            .assert_status_bad_request();
    }
}
