//! Database query functions for the transaction store.

use diesel::prelude::*;
use tracing::instrument;

use crate::COMPONENT;
use crate::db::errors::DatabaseError;
use crate::db::models::{TransactionRow, TransactionRowInsert};
use crate::db::schema;

// PAYMENT QUERIES
// ================================================================================================

/// Inserts a new transaction row and returns the id the store assigned to it.
///
/// # Raw SQL
///
/// ```sql
/// INSERT INTO
///     transactions (user_id, to_account_number, from_account_number, amount, created_date, status)
/// VALUES
///     (?, ?, ?, ?, ?, ?)
/// RETURNING
///     transaction_id
/// ```
#[instrument(target = COMPONENT, skip_all, fields(user_id = %row.user_id), err)]
pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    row: TransactionRowInsert,
) -> Result<i64, DatabaseError> {
    let transaction_id = diesel::insert_into(schema::transactions::table)
        .values(row)
        .returning(schema::transactions::transaction_id)
        .get_result(conn)?;
    Ok(transaction_id)
}

/// Fetches the transaction rows matching the given id.
///
/// An id with no matching row yields an empty vector, not an error.
///
/// # Raw SQL
///
/// ```sql
/// SELECT
///     *
/// FROM
///     transactions
/// WHERE
///     transaction_id = ?
/// ```
#[instrument(target = COMPONENT, skip(conn), err)]
pub(crate) fn transactions_by_id(
    conn: &mut SqliteConnection,
    transaction_id: i64,
) -> Result<Vec<TransactionRow>, DatabaseError> {
    let rows = schema::transactions::table
        .filter(schema::transactions::transaction_id.eq(transaction_id))
        .select(TransactionRow::as_select())
        .load(conn)?;
    Ok(rows)
}

// TESTS
// ================================================================================================
