use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::COMPONENT;
use crate::classifier::Outcome;
use crate::db::errors::DatabaseError;
use crate::db::models::{TransactionRow, TransactionRowInsert};
use crate::db::queries;
use crate::server::AppState;
use crate::server::error::ApiError;
use crate::validation::validate_payment;

// RESPONSE MESSAGES
// ================================================================================================

const SUCCESS_MESSAGE: &str = "Transaction completed successfully";
const FAILURE_MESSAGE: &str =
    "Could not complete transaction. Service could be unavailable temporarily";
const SUSPICIOUS_MESSAGE: &str =
    "Suspicious transaction. Please validate the transaction status with txn Id";
const FETCH_MESSAGE: &str = "Data fetched successfully";

/// The advisory message paired with each outcome.
fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => SUCCESS_MESSAGE,
        Outcome::Failure => FAILURE_MESSAGE,
        Outcome::Suspicious => SUSPICIOUS_MESSAGE,
    }
}

// REQUEST & RESPONSE TYPES
// ================================================================================================

/// A payment submission.
///
/// All fields travel as strings, matching the wire contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub user_id: String,
    pub to_account_number: String,
    pub from_account_number: String,
    pub amount: String,
}

/// The envelope returned by the payment route.
#[derive(Debug, Serialize)]
pub(crate) struct PaymentResponse {
    status: u16,
    message: &'static str,
    #[serde(rename = "txnDetail")]
    txn_detail: Option<TxnDetail>,
}

/// The persisted row as reported back to the caller.
///
/// `status` carries the raw outcome code rather than the stored boolean flag.
#[derive(Debug, Serialize)]
pub(crate) struct TxnDetail {
    transaction_id: i64,
    user_id: String,
    to_account_number: String,
    from_account_number: String,
    amount: String,
    created_date: i64,
    status: u16,
}

impl TxnDetail {
    fn new(row: TransactionRow, outcome: Outcome) -> Self {
        Self {
            transaction_id: row.transaction_id,
            user_id: row.user_id,
            to_account_number: row.to_account_number,
            from_account_number: row.from_account_number,
            amount: row.amount,
            created_date: row.created_date,
            status: outcome.code(),
        }
    }
}

/// The envelope returned by the lookup route.
#[derive(Debug, Serialize)]
pub(crate) struct TransactionDetailsResponse {
    status: u16,
    message: &'static str,
    transactions: Vec<TransactionRow>,
}

/// The plaintext credential pair served to any caller.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsResponse {
    username: String,
    password: String,
}

// HANDLERS
// ================================================================================================

/// Liveness signal.
pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}

/// Static description of the API surface and its status codes.
pub(crate) async fn docs() -> Json<serde_json::Value> {
    Json(json!({
        "endpoints": [
            {
                "path": "/health",
                "method": "GET",
                "authRequired": false,
                "description": "Liveness check",
            },
            {
                "path": "/docs",
                "method": "GET",
                "authRequired": false,
                "description": "This document",
            },
            {
                "path": "/get-credentials",
                "method": "POST",
                "authRequired": false,
                "description": "Returns the credentials accepted by the protected endpoints",
            },
            {
                "path": "/make-payment",
                "method": "POST",
                "authRequired": true,
                "description": "Submits a payment for processing",
                "requestBody": {
                    "userId": "bed66608-7b7f-4772-b646-b89cb6d7dc6b (must be a uuid v4)",
                    "toAccountNumber": "111 (must differ from fromAccountNumber)",
                    "fromAccountNumber": "222",
                    "amount": "150 (must be a number greater than 100)",
                },
            },
            {
                "path": "/get-transaction-details/{id}",
                "method": "GET",
                "authRequired": true,
                "description": "Returns the stored transactions matching the id",
            },
        ],
        "statusCodes": [
            { "code": 100, "label": "SUCCESS", "httpStatus": 200 },
            { "code": 101, "label": "FAILURE", "httpStatus": 200 },
            { "code": 102, "label": "SUSPICIOUS", "httpStatus": 200 },
            { "code": 400, "label": "VALIDATION_ERROR", "httpStatus": 400 },
            { "code": 401, "label": "UNAUTHORIZED", "httpStatus": 401 },
            { "code": 500, "label": "STORAGE_ERROR", "httpStatus": 500 },
        ],
    }))
}

/// Serves the configured credentials in plaintext.
///
/// Deliberately unauthenticated; the route exists so clients can self-serve the pair the
/// protected routes expect.
pub(crate) async fn get_credentials(State(state): State<AppState>) -> Json<CredentialsResponse> {
    Json(CredentialsResponse {
        username: state.credentials.username.clone(),
        password: state.credentials.password.clone(),
    })
}

/// Accepts a payment, classifies it, and persists every non-failed attempt.
///
/// Failures are reported to the caller and leave no trace in the store. Suspicious attempts
/// are stored flagged, while the top-level response still reports the success code.
#[instrument(target = COMPONENT, skip_all, err)]
pub(crate) async fn make_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    validate_payment(&request)?;

    let outcome = state.classifier.draw();
    if outcome == Outcome::Failure {
        return Ok(Json(PaymentResponse {
            status: outcome.code(),
            message: outcome_message(outcome),
            txn_detail: None,
        }));
    }

    let row = TransactionRowInsert {
        user_id: request.user_id,
        to_account_number: request.to_account_number,
        from_account_number: request.from_account_number,
        amount: request.amount,
        created_date: Utc::now().timestamp_millis(),
        status: outcome.persisted_status(),
    };

    let transaction_id = state
        .db
        .transact("insert_transaction", move |conn| queries::insert_transaction(conn, row))
        .await?;
    let row = state
        .db
        .query("transactions_by_id", move |conn| {
            queries::transactions_by_id(conn, transaction_id)
        })
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::InsertedRowMissing(transaction_id))?;

    Ok(Json(PaymentResponse {
        status: Outcome::Success.code(),
        message: outcome_message(outcome),
        txn_detail: Some(TxnDetail::new(row, outcome)),
    }))
}

/// Returns the stored rows matching the requested id; absent ids yield an empty list.
#[instrument(target = COMPONENT, skip_all, fields(transaction_id), err)]
pub(crate) async fn get_transaction_details(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<TransactionDetailsResponse>, ApiError> {
    let transactions = state
        .db
        .query("transactions_by_id", move |conn| {
            queries::transactions_by_id(conn, transaction_id)
        })
        .await?;

    Ok(Json(TransactionDetailsResponse {
        status: Outcome::Success.code(),
        message: FETCH_MESSAGE,
        transactions,
    }))
}
