//! Dispatches transaction operations to whichever backend the handle wraps.

use std::sync::Mutex;

use rusqlite::Connection;

use crate::{
    DatabaseHandle, Error,
    transaction::{
        core::{NewTransaction, Transaction, TransactionSummary},
        mongo, sqlite,
    },
};

/// Run `query` while holding the SQLite connection lock.
fn with_connection<T>(
    connection: &Mutex<Connection>,
    query: impl FnOnce(&Connection) -> Result<T, Error>,
) -> Result<T, Error> {
    let connection = connection.lock().map_err(|_| Error::DatabaseLockError)?;

    query(&connection)
}

impl DatabaseHandle {
    /// Store a new transaction and return it with its assigned ID.
    pub async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        match self {
            DatabaseHandle::Mongo(database) => mongo::create_transaction(transaction, database).await,
            DatabaseHandle::Sqlite(connection) => with_connection(connection, |connection| {
                sqlite::create_transaction(transaction, connection)
            }),
        }
    }

    /// Get every transaction belonging to `user_id`, in insertion order.
    pub async fn get_transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, Error> {
        match self {
            DatabaseHandle::Mongo(database) => {
                mongo::get_transactions_by_user(user_id, database).await
            }
            DatabaseHandle::Sqlite(connection) => with_connection(connection, |connection| {
                sqlite::get_transactions_by_user(user_id, connection)
            }),
        }
    }

    /// Delete the transaction with the ID `id`, returning how many were deleted (0 or 1).
    pub async fn delete_transaction(&self, id: &str) -> Result<u64, Error> {
        match self {
            DatabaseHandle::Mongo(database) => mongo::delete_transaction(id, database).await,
            DatabaseHandle::Sqlite(connection) => with_connection(connection, |connection| {
                sqlite::delete_transaction(id, connection)
            }),
        }
    }

    /// Summarise every transaction belonging to `user_id`.
    pub async fn get_summary_by_user(&self, user_id: &str) -> Result<TransactionSummary, Error> {
        match self {
            DatabaseHandle::Mongo(database) => mongo::get_summary_by_user(user_id, database).await,
            DatabaseHandle::Sqlite(connection) => with_connection(connection, |connection| {
                sqlite::get_summary_by_user(user_id, connection)
            }),
        }
    }
}
