//! Stores transactions in an SQLite table.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    transaction::core::{CategorySummary, NewTransaction, Transaction, TransactionSummary},
};

/// Create the transaction table and its index if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL CHECK (user_id <> ''),
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id);",
    )
}

/// Map a database row to a [Transaction].
///
/// Expects the columns `id, user_id, amount, category, date` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id: i64 = row.get(0)?;

    Ok(Transaction {
        id: id.to_string(),
        user_id: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Insert `transaction` and return it with its new ID.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, user_id, amount, category, date",
        )?
        .query_row(
            (
                &transaction.user_id,
                transaction.amount,
                &transaction.category,
                transaction.date,
            ),
            map_transaction_row,
        )
        .map_err(Error::from)
}

/// Get all of `user_id`'s transactions in the order they were inserted.
pub fn get_transactions_by_user(
    user_id: &str,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, category, date FROM \"transaction\"
             WHERE user_id = :user_id
             ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", user_id)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

type RowsAffected = u64;

/// Delete the transaction with the given ID.
///
/// Only the exact ID string handed out by [create_transaction] matches a row.
/// Anything else, including other spellings of the same number such as "+1"
/// or "01", deletes nothing.
pub fn delete_transaction(id: &str, connection: &Connection) -> Result<RowsAffected, Error> {
    let Some(id) = parse_row_id(id) else {
        return Ok(0);
    };

    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    Ok(rows_affected as RowsAffected)
}

fn parse_row_id(id: &str) -> Option<i64> {
    id.parse::<i64>()
        .ok()
        .filter(|row_id| row_id.to_string() == id)
}

/// Summarise all of `user_id`'s transactions.
pub fn get_summary_by_user(
    user_id: &str,
    connection: &Connection,
) -> Result<TransactionSummary, Error> {
    let by_category = connection
        .prepare(
            "SELECT category, SUM(amount), COUNT(*) FROM \"transaction\"
             WHERE user_id = :user_id
             GROUP BY category
             ORDER BY category ASC",
        )?
        .query_map(&[(":user_id", user_id)], |row| {
            let count: i64 = row.get(2)?;

            Ok(CategorySummary {
                category: row.get(0)?,
                total: row.get(1)?,
                count: count as u64,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let (income, expenses) = connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN amount > 0 THEN amount END), 0.0),
                COALESCE(SUM(CASE WHEN amount < 0 THEN amount END), 0.0)
             FROM \"transaction\"
             WHERE user_id = :user_id",
        )?
        .query_row(&[(":user_id", user_id)], |row| {
            Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?))
        })?;

    Ok(TransactionSummary::new(user_id, by_category, income, expenses))
}
