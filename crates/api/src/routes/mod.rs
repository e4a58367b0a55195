//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::auth::{require_access, require_refresh},
};

pub mod accounts;
pub mod health;
pub mod transactions;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Routes that require an access token
    let access_routes = Router::new()
        .merge(users::access_routes())
        .merge(accounts::routes())
        .merge(transactions::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_access,
        ));

    // Routes that require a refresh token
    let refresh_routes = users::refresh_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        require_refresh,
    ));

    Router::new()
        .merge(health::routes())
        .merge(users::public_routes())
        .merge(access_routes)
        .merge(refresh_routes)
}
