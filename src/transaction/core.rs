//! Defines the core data models for transactions.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// Dates travel as "YYYY-MM-DD" strings, both over HTTP and inside stored documents.
time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// The identifier the database assigned to a transaction.
///
/// For MongoDB this is the hex string of the document's ObjectId, for SQLite
/// it is the row ID.
pub type TransactionId = String;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income recorded for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user the transaction belongs to.
    ///
    /// This is not checked against any user registry.
    pub user_id: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// The sign and currency are up to the client.
    pub amount: f64,
    /// A free-text label such as "food" or "transport".
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user the transaction belongs to, never blank.
    pub user_id: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A free-text label, never blank.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Attach the database assigned `id` to create the stored [Transaction].
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error naming the field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// The user the transaction belongs to.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The amount of money spent or earned.
    #[serde(default)]
    pub amount: Option<f64>,
    /// A free-text label.
    #[serde(default)]
    pub category: Option<String>,
    /// When the transaction happened.
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
}

impl TryFrom<CreateTransactionRequest> for NewTransaction {
    type Error = Error;

    fn try_from(request: CreateTransactionRequest) -> Result<Self, Self::Error> {
        let user_id = require_text(request.user_id, "userId")?;
        let category = require_text(request.category, "category")?;

        let amount = match request.amount {
            Some(amount) if amount.is_finite() => amount,
            Some(_) => return Err(Error::Validation("amount must be a finite number".to_owned())),
            None => return Err(Error::Validation("amount is required".to_owned())),
        };

        let date = request
            .date
            .ok_or_else(|| Error::Validation("date is required".to_owned()))?;

        Ok(Self {
            user_id,
            amount,
            category,
            date,
        })
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(Error::Validation(format!("{field} must not be empty"))),
        None => Err(Error::Validation(format!("{field} is required"))),
    }
}

/// The total and number of a user's transactions in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// The category label.
    pub category: String,
    /// The sum of the amounts in this category.
    pub total: f64,
    /// The number of transactions in this category.
    pub count: u64,
}

/// Aggregate figures over all of a user's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// The user the summary is for.
    pub user_id: String,
    /// The sum of all amounts.
    pub total: f64,
    /// The number of transactions.
    pub count: u64,
    /// The sum of the positive amounts.
    pub income: f64,
    /// The sum of the negative amounts.
    pub expenses: f64,
    /// Per-category totals, ordered by category name.
    pub by_category: Vec<CategorySummary>,
}

impl TransactionSummary {
    /// Build a summary from per-category figures and the income/expense split.
    ///
    /// `by_category` is sorted by category name, the grand total and count are
    /// the sums over all categories.
    pub fn new(
        user_id: &str,
        mut by_category: Vec<CategorySummary>,
        income: f64,
        expenses: f64,
    ) -> Self {
        by_category.sort_by(|a, b| a.category.cmp(&b.category));

        Self {
            user_id: user_id.to_owned(),
            total: by_category.iter().map(|category| category.total).sum(),
            count: by_category.iter().map(|category| category.count).sum(),
            income,
            expenses,
            by_category,
        }
    }
}



#[cfg(test)]
mod summary_tests {
    use crate::transaction::core::{CategorySummary, TransactionSummary};

    #[test]
    fn totals_are_summed_over_categories_and_sorted() {
        let summary = TransactionSummary::new(
            "u1",
            vec![
                CategorySummary {
                    category: "transport".to_owned(),
                    total: 30.0,
                    count: 1,
                },
                CategorySummary {
                    category: "food".to_owned(),
                    total: 50.0,
                    count: 2,
                },
            ],
            80.0,
            0.0,
        );

        assert_eq!(summary.total, 80.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.by_category[0].category, "food");
        assert_eq!(summary.by_category[1].category, "transport");
    }

    #[test]
    fn empty_summary_is_all_zeros() {
        let summary = TransactionSummary::new("nobody", Vec::new(), 0.0, 0.0);

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.count, 0);
        assert!(summary.by_category.is_empty());
    }
}
