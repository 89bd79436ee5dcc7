//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{id}', use [format_endpoint].

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access transactions by ID.
///
/// `GET` treats the parameter as a user ID and lists that user's transactions,
/// `DELETE` treats it as a transaction ID. The router cannot hold two
/// differently named parameters at the same position, hence the shared name.
pub const TRANSACTION: &str = "/api/transactions/{id}";
/// The route to get the summary of a user's transactions.
pub const TRANSACTION_SUMMARY: &str = "/api/transactions/summary/{user_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path contains a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let Some(length) = endpoint_path[start..].find('}') else {
        return endpoint_path.to_owned();
    };
    let end = start + length;

    let name = &endpoint_path[start + 1..end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        return endpoint_path.to_owned();
    }

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end + 1..])
}
