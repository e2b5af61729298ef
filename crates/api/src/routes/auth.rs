//! Authentication routes for register, login, and logout.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extractors::ValidatedJson,
    middleware::AuthUser,
};
use fintrack_core::auth::{hash_password, verify_password, verify_password_against_dummy};
use fintrack_db::{TokenBlocklistRepository, UserRepository};
use fintrack_shared::auth::{LoginRequest, LoginResponse, RegisterRequest};

use super::users::user_info;

/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Auth routes that need a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(logout))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("invalid_credentials", "Invalid email or password")
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new(state.conn());
    let email = normalize_email(&payload.email);

    if user_repo.email_exists(&email).await? {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "email_exists",
            "An account with this email already exists",
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(payload.name.trim(), &email, &password_hash)
        .await?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user_info(&user))))
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new(state.conn());
    let email = normalize_email(&payload.email);

    let Some(user) = user_repo.find_by_email(&email).await? else {
        // Timing must match a wrong-password attempt.
        verify_password_against_dummy(&payload.password);
        info!("Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let access_token = state.jwt_service.generate_access_token(user.id)?;
    info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse::bearer(
        access_token,
        state.jwt_service.access_token_expires_in(),
    )))
}

/// POST /auth/logout - Revoke the presented token.
async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    revoke_token(&state, &user).await?;
    info!(user_id = %user.user_id(), "User logged out");

    Ok(Json(json!({ "message": "Logged out" })))
}

/// Adds the caller's token to the blocklist.
pub(crate) async fn revoke_token(state: &AppState, user: &AuthUser) -> Result<(), ApiError> {
    let claims = user.claims();
    let expires_at = claims.expires_at().unwrap_or_else(Utc::now);

    TokenBlocklistRepository::new(state.conn())
        .revoke(claims.token_id(), claims.user_id(), expires_at)
        .await?;
    Ok(())
}
