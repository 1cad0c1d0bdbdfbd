//! Handlers for the `/submissions` resource.
//!
//! Submissions are created through the container submission endpoint;
//! here they can only be read and revoked.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use checker_core::error::CoreError;
use checker_core::types::DbId;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::submission::Submission;
use checker_db::repositories::SubmissionRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/submissions
///
/// Admins see every submission; a client sees at most their own.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Submission>>> {
    let actor = auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let submissions = if actor.is_admin() {
        SubmissionRepo::list(&mut conn).await?
    } else {
        SubmissionRepo::find_by_client(&mut conn, &actor.id)
            .await?
            .into_iter()
            .collect()
    };
    Ok(Json(submissions))
}

/// GET /api/v1/submissions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Submission>> {
    let actor = auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let submission = SubmissionRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Submission", id)))?;

    if !actor.is_admin() && submission.client_id != actor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "this submission belongs to another client".into(),
        )));
    }
    Ok(Json(submission))
}

/// DELETE /api/v1/submissions/{id}
///
/// Revoking a submission frees the container for re-review. Allowed for
/// admins and for the submitting client.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = auth.resolve(&state.pool).await?;

    {
        let mut conn = state.pool.acquire().await?;
        let submission = SubmissionRepo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Submission", id)))?;
        if !actor.is_admin() && submission.client_id != actor.id {
            return Err(AppError::Core(CoreError::Forbidden(
                "this submission belongs to another client".into(),
            )));
        }
    }

    LifecycleManager::delete(&state.pool, EntityRef::Submission(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
