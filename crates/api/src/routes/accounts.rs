//! Account routes: open, inspect, and close currency accounts.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use bankline_core::accounts::AccountService;
use bankline_core::history::HistoryService;
use bankline_db::UnitOfWorkExt;
use bankline_shared::requests::{AccountRequest, CreateAccountRequest};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extractors::{ValidatedJson, ValidatedQuery},
    middleware::AuthUser,
};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account/create", put(create_account))
        .route("/account/balance", post(balance))
        .route("/account/view-transaction-history", get(account_history))
        .route("/account/view-all-transaction-history", get(all_history))
        .route("/account/delete", delete(delete_account))
}

/// PUT /account/create - Open an account in the given currency.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> Result<Response, ApiError> {
    let currency = payload
        .currency()
        .ok_or_else(|| ApiError::validation("Unsupported currency"))?;

    let mut uow = state.db.unit_of_work().await?;
    let outcome = AccountService::create(&mut uow, auth.username(), currency).await;
    let account = uow.finish(outcome).await?;

    info!(username = %auth.username(), account_id = %account.id, %currency, "Account created");
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Account created successfully", "account id": account.id })),
    )
        .into_response())
}

/// POST /account/balance - Return the balance of one account.
async fn balance(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = AccountService::balance(&mut uow, auth.username(), payload.id).await;
    let account = uow.finish(outcome).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Account balance retrieved successfully", "account": account })),
    )
        .into_response())
}

/// GET /account/view-transaction-history?id= - History of one account, newest first.
async fn account_history(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<AccountRequest>,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = HistoryService::for_account(&mut uow, auth.username(), query.id).await;
    let transactions = uow.finish(outcome).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Transaction history retrieved successfully",
            "transactions": transactions
        })),
    )
        .into_response())
}

/// GET /account/view-all-transaction-history - History of every account in id order.
async fn all_history(State(state): State<AppState>, auth: AuthUser) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = HistoryService::for_user(&mut uow, auth.username()).await;
    let transactions = uow.finish(outcome).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "All transaction history retrieved successfully",
            "transactions": transactions
        })),
    )
        .into_response())
}

/// DELETE /account/delete - Close an empty account.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = AccountService::deactivate(&mut uow, auth.username(), payload.id).await;
    uow.finish(outcome).await?;

    info!(username = %auth.username(), account_id = %payload.id, "Account deactivated");
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Account deleted successfully" })),
    )
        .into_response())
}
