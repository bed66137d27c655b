//! Authentication routes: company registration, login, token refresh.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::{error_response, internal_error};
use gasto_core::auth::{hash_password, validate_password_strength, verify_password};
use gasto_core::policy::Role;
use gasto_db::UserRepository;
use gasto_db::entities::sea_orm_active_enums::CompanySize;
use gasto_db::repositories::user::{RegisterCompanyInput, UserError};
use gasto_shared::TokenPair;

/// Creates the auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Request body for company registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Company name.
    pub company_name: String,
    /// Company contact email.
    pub contact_email: String,
    /// Company phone.
    pub phone: Option<String>,
    /// Company size: small, medium, large.
    pub size: String,
    /// Admin first name.
    pub first_name: String,
    /// Admin last name.
    pub last_name: String,
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// A previously issued refresh token.
    pub refresh_token: String,
}

fn parse_company_size(s: &str) -> Option<CompanySize> {
    match s.to_lowercase().as_str() {
        "small" => Some(CompanySize::Small),
        "medium" => Some(CompanySize::Medium),
        "large" => Some(CompanySize::Large),
        _ => None,
    }
}

/// POST `/auth/register` - Create a company with its bootstrap admin.
///
/// The first user of a company is always an admin.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = validate_password_strength(&payload.password) {
        return error_response(StatusCode::BAD_REQUEST, "weak_password", e.to_string());
    }

    let Some(size) = parse_company_size(&payload.size) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_size",
            "Company size must be one of: small, medium, large",
        );
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let repo = UserRepository::new((*state.db).clone());
    let input = RegisterCompanyInput {
        company_name: payload.company_name,
        contact_email: payload.contact_email,
        phone: payload.phone,
        size,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        password_hash,
    };

    match repo.register_company(input).await {
        Ok((company, admin)) => {
            info!(company_id = %company.id, user_id = %admin.id, "Company registered");

            let tokens = match issue_tokens(&state, &admin) {
                Ok(tokens) => tokens,
                Err(response) => return response,
            };

            (
                StatusCode::CREATED,
                Json(json!({
                    "company": company,
                    "user": admin,
                    "access_token": tokens.access_token,
                    "refresh_token": tokens.refresh_token,
                    "expires_in": tokens.expires_in,
                })),
            )
                .into_response()
        }
        Err(UserError::DuplicateEmail(email)) => error_response(
            StatusCode::CONFLICT,
            "duplicate_email",
            format!("Email already registered: {email}"),
        ),
        Err(e) => {
            error!(error = %e, "Failed to register company");
            internal_error()
        }
    }
}

/// POST `/auth/login` - Verify credentials and issue tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    let user = match repo.find_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password",
            );
        }
        Err(e) => {
            error!(error = %e, "Failed to look up user");
            return internal_error();
        }
    };

    if !user.is_active {
        return error_response(
            StatusCode::FORBIDDEN,
            "account_disabled",
            "This account has been disabled",
        );
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password",
            );
        }
        Err(e) => {
            error!(error = %e, "Password verification failed");
            return internal_error();
        }
    }

    let tokens = match issue_tokens(&state, &user) {
        Ok(tokens) => tokens,
        Err(response) => return response,
    };

    info!(user_id = %user.id, "User logged in");

    (
        StatusCode::OK,
        Json(json!({
            "user": user,
            "access_token": tokens.access_token,
            "refresh_token": tokens.refresh_token,
            "expires_in": tokens.expires_in,
        })),
    )
        .into_response()
}

/// POST `/auth/refresh` - Rotate tokens from a refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        // Access tokens are not accepted here, only real refresh tokens.
        Ok(claims) if claims.is_refresh() => claims,
        Ok(_) | Err(_) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired refresh token",
            );
        }
    };

    let repo = UserRepository::new((*state.db).clone());
    let user = match repo.find_by_id(claims.user_id()).await {
        Ok(user) if user.is_active => user,
        Ok(_) => {
            return error_response(
                StatusCode::FORBIDDEN,
                "account_disabled",
                "This account has been disabled",
            );
        }
        Err(e) => {
            error!(error = %e, "Failed to look up user for refresh");
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired refresh token",
            );
        }
    };

    let tokens = match issue_tokens(&state, &user) {
        Ok(tokens) => tokens,
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": tokens.access_token,
            "refresh_token": tokens.refresh_token,
            "expires_in": tokens.expires_in,
        })),
    )
        .into_response()
}

/// Issues an access/refresh token pair for a user.
fn issue_tokens(
    state: &AppState,
    user: &gasto_db::entities::users::Model,
) -> Result<TokenPair, axum::response::Response> {
    let role = Role::from(user.role.clone());

    let access = state
        .jwt_service
        .generate_access_token(user.id, user.company_id, role.as_str());
    let refresh = state
        .jwt_service
        .generate_refresh_token(user.id, user.company_id, role.as_str());

    match (access, refresh) {
        (Ok(access), Ok(refresh)) => Ok(TokenPair::new(
            access,
            refresh,
            state.jwt_service.access_token_expires_in(),
        )),
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "Failed to issue tokens");
            Err(internal_error())
        }
    }
}
