//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use checker_db::models::user::User;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/auth/me
///
/// Returns the caller's account, registering it on first login.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<User>> {
    let user = auth.resolve(&state.pool).await?;
    Ok(Json(user))
}
