//! Money movement routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::put,
};
use bankline_core::ledger::{LedgerEngine, TransferRequest};
use bankline_db::UnitOfWorkExt;
use bankline_shared::requests::{AmountRequest, TransferFundsRequest};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transaction/transfer", put(transfer))
        .route("/transaction/deposit", put(deposit))
        .route("/transaction/withdraw", put(withdraw))
}

fn success(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}

/// PUT /transaction/transfer - Move funds to another user's account.
async fn transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<TransferFundsRequest>,
) -> Result<Response, ApiError> {
    let request = TransferRequest {
        sender_account_id: payload.id,
        receiver_username: payload.receiver_username,
        receiver_account_id: payload.receiver_id,
        amount: payload.amount,
    };

    let mut uow = state.db.unit_of_work().await?;
    let outcome = LedgerEngine::transfer(&mut uow, auth.username(), &request).await;
    let record = uow.finish(outcome).await?;

    info!(
        username = %auth.username(),
        transaction_id = %record.id,
        sender_account_id = %request.sender_account_id,
        receiver_account_id = %request.receiver_account_id,
        amount = %request.amount,
        "Transfer completed"
    );
    Ok(success("Transfer successful"))
}

/// PUT /transaction/deposit - Add funds to one of the caller's accounts.
async fn deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<AmountRequest>,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = LedgerEngine::deposit(&mut uow, auth.username(), payload.id, payload.amount).await;
    let record = uow.finish(outcome).await?;

    info!(
        username = %auth.username(),
        transaction_id = %record.id,
        account_id = %payload.id,
        amount = %payload.amount,
        "Deposit completed"
    );
    Ok(success("Deposit successful"))
}

/// PUT /transaction/withdraw - Remove funds from one of the caller's accounts.
async fn withdraw(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<AmountRequest>,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome =
        LedgerEngine::withdraw(&mut uow, auth.username(), payload.id, payload.amount).await;
    let record = uow.finish(outcome).await?;

    info!(
        username = %auth.username(),
        transaction_id = %record.id,
        account_id = %payload.id,
        amount = %payload.amount,
        "Withdrawal completed"
    );
    Ok(success("Withdrawal successful"))
}
