//! Routes for the authenticated user's own account.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use fintrack_db::{UserRepository, entities::users};
use fintrack_shared::auth::UserInfo;

use super::auth::revoke_token;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me).delete(delete_me))
}

pub(crate) fn user_info(user: &users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.with_timezone(&Utc),
    }
}

/// GET /users/me - Current user's profile.
async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let found = UserRepository::new(state.conn())
        .find_by_id(user.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user_info(&found)))
}

/// DELETE /users/me - Delete the account, its transactions, and the token.
async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = UserRepository::new(state.conn())
        .delete(user.user_id())
        .await?;
    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    revoke_token(&state, &user).await?;
    info!(user_id = %user.user_id(), "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
