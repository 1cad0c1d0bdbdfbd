//! Handlers for the `/users` resource.
//!
//! Accounts are created implicitly on first login, so there is no create
//! endpoint; the rest of the surface is read, rename, and delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use checker_core::error::CoreError;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::user::{UpdateUser, User, UserRole};
use checker_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
}

/// GET /api/v1/users?role=client
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Vec<User>>> {
    auth.require_admin(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let users = match query.role {
        Some(role) => UserRepo::list_by_role(&mut conn, role).await?,
        None => UserRepo::list(&mut conn).await?,
    };
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let actor = auth.resolve(&state.pool).await?;
    if actor.id != id && !actor.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "only admins can read other accounts".into(),
        )));
    }

    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::find_by_id(&mut conn, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &id)))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
///
/// Only the display name is mutable; email, role, and registration date
/// are fixed at account creation.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let actor = auth.resolve(&state.pool).await?;
    if actor.id != id && !actor.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "only admins can rename other accounts".into(),
        )));
    }

    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::update(&mut conn, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &id)))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
///
/// Cascades through everything the account exclusively owns: an admin's
/// projects, or a client's project holder, projects, and submission.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require_admin(&state.pool).await?;
    LifecycleManager::delete(&state.pool, EntityRef::User(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
