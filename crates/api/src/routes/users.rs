//! User routes: registration, login, profile, and session management.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use bankline_core::accounts::AccountService;
use bankline_core::identity::{IdentityService, LoginIdentity, ProfileUpdate, Registration};
use bankline_db::UnitOfWorkExt;
use bankline_shared::TokenPair;
use bankline_shared::auth::{LoginRequest, RegisterRequest, UpdateUserRequest};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};

/// Routes open to anonymous callers.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
}

/// Routes that require an access token.
pub fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/user/update", put(update))
        .route("/user/view-profile", get(view_profile))
        .route("/user/view-accounts", get(view_accounts))
        .route("/user/delete", delete(delete_user))
        .route("/user/logout", delete(logout))
}

/// Routes that require a refresh token.
pub fn refresh_routes() -> Router<AppState> {
    Router::new()
        .route("/user/logout-refresh", delete(logout))
        .route("/user/refresh", post(refresh))
}

fn token_response(message: &str, tokens: &TokenPair) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": message, "user": tokens })),
    )
        .into_response()
}

/// POST /user/register - Register a new user and return tokens.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    let registration = Registration {
        first_name: payload.first_name,
        last_name: payload.last_name,
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::register(&mut uow, &*state.hasher, registration).await;
    let user = uow.finish(outcome).await?;

    let tokens = state.jwt_service.generate_pair(&user.username)?;
    info!(username = %user.username, user_id = %user.id, "User registered");
    Ok(token_response("User registered successfully", &tokens))
}

/// POST /user/login - Authenticate by username or email and return tokens.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let identity = match (payload.username, payload.email) {
        (Some(username), None) => LoginIdentity::Username(username),
        (None, Some(email)) => LoginIdentity::Email(email),
        _ => return Err(ApiError::validation("Email or username is required")),
    };

    let mut uow = state.db.unit_of_work().await?;
    let outcome =
        IdentityService::authenticate(&mut uow, &*state.hasher, &identity, &payload.password)
            .await;
    let user = uow.finish(outcome).await?;

    let tokens = state.jwt_service.generate_pair(&user.username)?;
    info!(username = %user.username, "User logged in");
    Ok(token_response("User logged in successfully", &tokens))
}

/// PUT /user/update - Change names and/or password.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let update = ProfileUpdate {
        first_name: payload.first_name,
        last_name: payload.last_name,
        new_password: payload.new_password,
    };

    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::update(&mut uow, &*state.hasher, auth.username(), update).await;
    uow.finish(outcome).await?;

    info!(username = %auth.username(), "User information updated");
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User information updated successfully" })),
    )
        .into_response())
}

/// GET /user/view-profile - Return the caller's profile.
async fn view_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::profile(&mut uow, auth.username()).await;
    let profile = uow.finish(outcome).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User retreived successfully", "user": profile })),
    )
        .into_response())
}

/// GET /user/view-accounts - List the caller's active accounts.
async fn view_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = AccountService::list(&mut uow, auth.username()).await;
    let accounts = uow.finish(outcome).await?;

    let body = if accounts.is_empty() {
        json!({ "message": "No accounts found" })
    } else {
        json!({ "message": "Accounts retreived successfully", "accounts": accounts })
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// DELETE /user/delete - Deactivate the caller and all their accounts.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::deactivate(&mut uow, auth.username()).await;
    uow.finish(outcome).await?;

    info!(username = %auth.username(), "User deactivated");
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User deleted successfully" })),
    )
        .into_response())
}

/// DELETE /user/logout and /user/logout-refresh - Revoke the presented token.
async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::revoke_token(&mut uow, auth.username(), auth.jti()).await;
    uow.finish(outcome).await?;

    info!(username = %auth.username(), kind = %auth.claims().kind, "User logged out");
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User logged out successfully" })),
    )
        .into_response())
}

/// POST /user/refresh - Revoke the refresh token and issue a new pair.
async fn refresh(State(state): State<AppState>, auth: AuthUser) -> Result<Response, ApiError> {
    let mut uow = state.db.unit_of_work().await?;
    let outcome = IdentityService::revoke_token(&mut uow, auth.username(), auth.jti()).await;
    uow.finish(outcome).await?;

    let tokens = state.jwt_service.generate_pair(auth.username())?;
    info!(username = %auth.username(), "Token refreshed");
    Ok(token_response("Token refreshed successfully", &tokens))
}
