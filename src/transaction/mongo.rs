//! Stores transactions as documents in a MongoDB collection.

use mongodb::{
    Collection, Database,
    bson::{Bson, doc, from_document, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::core::{
        CategorySummary, NewTransaction, Transaction, TransactionSummary, iso_date,
    },
};

/// The name of the collection holding transaction documents.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// A transaction as it is laid out in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    amount: f64,
    category: String,
    #[serde(with = "iso_date")]
    date: Date,
}

impl From<NewTransaction> for TransactionDocument {
    fn from(transaction: NewTransaction) -> Self {
        Self {
            id: None,
            user_id: transaction.user_id,
            amount: transaction.amount,
            category: transaction.category,
            date: transaction.date,
        }
    }
}

impl TryFrom<TransactionDocument> for Transaction {
    type Error = Error;

    fn try_from(document: TransactionDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| Error::CorruptDocument("transaction document has no _id".to_owned()))?;

        Ok(Transaction {
            id: id.to_hex(),
            user_id: document.user_id,
            amount: document.amount,
            category: document.category,
            date: document.date,
        })
    }
}

/// One row of the summary aggregation's output.
#[derive(Debug, Deserialize)]
struct CategoryGroup {
    #[serde(rename = "_id")]
    category: String,
    total: f64,
    count: i64,
    income: f64,
    expenses: f64,
}

fn transactions(database: &Database) -> Collection<TransactionDocument> {
    database.collection(TRANSACTIONS_COLLECTION)
}

/// Insert `transaction` and return it with the ObjectId MongoDB assigned.
pub async fn create_transaction(
    transaction: NewTransaction,
    database: &Database,
) -> Result<Transaction, Error> {
    let document = TransactionDocument::from(transaction.clone());
    let result = transactions(database).insert_one(document).await?;

    match result.inserted_id {
        Bson::ObjectId(id) => Ok(transaction.into_transaction(id.to_hex())),
        other => Err(Error::CorruptDocument(format!(
            "expected an ObjectId for the inserted transaction, got {other}"
        ))),
    }
}

/// Get all of `user_id`'s transactions in the collection's natural order.
pub async fn get_transactions_by_user(
    user_id: &str,
    database: &Database,
) -> Result<Vec<Transaction>, Error> {
    let mut cursor = transactions(database)
        .find(doc! { "userId": user_id })
        .await?;

    let mut found = Vec::new();
    while cursor.advance().await? {
        let document = cursor.deserialize_current()?;
        found.push(Transaction::try_from(document)?);
    }

    Ok(found)
}

/// Delete the transaction whose `_id` has the hex string `id`.
///
/// Strings that are not valid ObjectIds cannot match a document, so they delete nothing.
pub async fn delete_transaction(id: &str, database: &Database) -> Result<u64, Error> {
    let Ok(object_id) = ObjectId::parse_str(id) else {
        return Ok(0);
    };

    let result = transactions(database)
        .delete_one(doc! { "_id": object_id })
        .await?;

    Ok(result.deleted_count)
}

/// Summarise all of `user_id`'s transactions with an aggregation pipeline.
pub async fn get_summary_by_user(
    user_id: &str,
    database: &Database,
) -> Result<TransactionSummary, Error> {
    let pipeline = [
        doc! { "$match": { "userId": user_id } },
        doc! {
            "$group": {
                "_id": "$category",
                "total": { "$sum": "$amount" },
                "count": { "$sum": 1 },
                "income": {
                    "$sum": { "$cond": [{ "$gt": ["$amount", 0.0] }, "$amount", 0.0] }
                },
                "expenses": {
                    "$sum": { "$cond": [{ "$lt": ["$amount", 0.0] }, "$amount", 0.0] }
                },
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ];

    let mut cursor = transactions(database).aggregate(pipeline).await?;

    let mut by_category = Vec::new();
    let mut income = 0.0;
    let mut expenses = 0.0;
    while cursor.advance().await? {
        let group: CategoryGroup = from_document(cursor.deserialize_current()?)
            .map_err(|error| Error::CorruptDocument(error.to_string()))?;

        income += group.income;
        expenses += group.expenses;
        by_category.push(CategorySummary {
            category: group.category,
            total: group.total,
            count: group.count.max(0) as u64,
        });
    }

    Ok(TransactionSummary::new(user_id, by_category, income, expenses))
}


/// Runs against a real deployment. Set `MONGODB_URI` and run with `cargo test -- --ignored`.
#[cfg(test)]
mod live_tests {
    use std::env;

    use mongodb::bson::{doc, oid::ObjectId};
    use time::macros::date;

    use crate::{
        DatabaseConfig, DatabaseHandle,
        transaction::{
            core::NewTransaction,
            mongo::{
                create_transaction, delete_transaction, get_summary_by_user,
                get_transactions_by_user, transactions,
            },
        },
    };

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn create_list_summarise_delete_against_mongodb() {
        let Ok(uri) = env::var("MONGODB_URI") else {
            eprintln!("MONGODB_URI is not set, skipping");
            return;
        };
        let name =
            env::var("MONGODB_DB_NAME").unwrap_or_else(|_| "transactions_api_test".to_owned());
        let database = match DatabaseHandle::open(&DatabaseConfig::new(&uri, &name))
            .await
            .unwrap()
        {
            DatabaseHandle::Mongo(database) => database,
            DatabaseHandle::Sqlite(_) => panic!("expected a MongoDB handle for {uri}"),
        };
        let user_id = format!("test-{}", ObjectId::new().to_hex());
        let new_transaction = |amount: f64, category: &str| NewTransaction {
            user_id: user_id.clone(),
            amount,
            category: category.to_owned(),
            date: date!(2024 - 01 - 01),
        };

        let food = create_transaction(new_transaction(50.0, "food"), &database)
            .await
            .unwrap();
        let transport = create_transaction(new_transaction(-30.0, "transport"), &database)
            .await
            .unwrap();
        let listed = get_transactions_by_user(&user_id, &database).await.unwrap();
        let summary = get_summary_by_user(&user_id, &database).await.unwrap();
        let deleted = delete_transaction(&food.id, &database).await.unwrap();
        let after_delete = get_summary_by_user(&user_id, &database).await.unwrap();

        transactions(&database)
            .delete_many(doc! { "userId": user_id.as_str() })
            .await
            .unwrap();

        assert_eq!(listed, vec![food, transport]);
        assert_eq!(summary.total, 20.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.income, 50.0);
        assert_eq!(summary.expenses, -30.0);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "food");
        assert_eq!(deleted, 1);
        assert_eq!(after_delete.total, -30.0);
        assert_eq!(after_delete.count, 1);
    }
}
