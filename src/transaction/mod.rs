//! Transaction management for the API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, request validation and the summary types
//! - Storage functions for the MongoDB and SQLite backends
//! - The route handlers for listing, creating, deleting and summarising transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
pub(crate) mod mongo;
pub(crate) mod sqlite;
mod state;
mod store;
mod summary_endpoint;

pub use self::core::{
    CategorySummary, NewTransaction, Transaction, TransactionId, TransactionSummary,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use summary_endpoint::get_summary_endpoint;
