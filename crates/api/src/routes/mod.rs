//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth::auth_middleware};
use gasto_shared::AppError;

pub mod auth;
pub mod budget_requests;
pub mod budgets;
pub mod categories;
pub mod clients;
pub mod companies;
pub mod departments;
pub mod health;
pub mod invoices;
pub mod requisitions;
pub mod suppliers;
pub mod transactions;
pub mod users;

/// Builds a JSON error response.
pub(crate) fn error_response(
    status: StatusCode,
    error: &str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({ "error": error, "message": message.into() })),
    )
        .into_response()
}

/// The opaque 500 response; details stay in the logs.
pub(crate) fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An error occurred",
    )
}

/// Renders an [`AppError`] as a JSON response.
///
/// Opaque errors (storage, internal) are logged here and surface only a
/// generic message; everything else carries its display text.
pub(crate) fn app_error_response(e: &AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if e.is_opaque() {
        error!(error = %e, "request failed");
        return error_response(status, e.error_code(), "An error occurred");
    }

    error_response(status, e.error_code(), e.to_string())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(companies::routes())
        .merge(departments::routes())
        .merge(categories::routes())
        .merge(suppliers::routes())
        .merge(clients::routes())
        .merge(budgets::routes())
        .merge(budget_requests::routes())
        .merge(requisitions::routes())
        .merge(transactions::routes())
        .merge(invoices::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
