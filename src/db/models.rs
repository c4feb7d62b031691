use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema;

/// A stored transaction row.
///
/// Serializes with the store's column names since the lookup route returns rows as-is.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub transaction_id: i64,
    pub user_id: String,
    pub to_account_number: String,
    pub from_account_number: String,
    pub amount: String,
    pub created_date: i64,
    pub status: bool,
}

/// A transaction row pending insertion; the store assigns `transaction_id`.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRowInsert {
    pub user_id: String,
    pub to_account_number: String,
    pub from_account_number: String,
    pub amount: String,
    pub created_date: i64,
    pub status: bool,
}
