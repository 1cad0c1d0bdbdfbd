//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use checker_core::error::CoreError;
use checker_core::types::DbId;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::project::{CreateProject, Project, UpdateProject};
use checker_db::repositories::{ProjectHolderRepo, ProjectRepo};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for project creation. The owning admin is the caller;
/// the target holder is addressed by its client.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub client_id: String,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let admin = auth.require_admin(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let holder = ProjectHolderRepo::find_by_client(&mut conn, &input.client_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ProjectHolder", &input.client_id)))?;

    let project = ProjectRepo::create(
        &mut conn,
        &CreateProject {
            title: input.title,
            description: input.description,
            admin_id: admin.id,
            holder_id: holder.id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Admins see every project; clients see their own portfolio.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let actor = auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let projects = if actor.is_admin() {
        ProjectRepo::list(&mut conn).await?
    } else {
        match ProjectHolderRepo::find_by_client(&mut conn, &actor.id).await? {
            Some(holder) => ProjectRepo::list_by_holder(&mut conn, holder.id).await?,
            None => Vec::new(),
        }
    };
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let actor = auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let project = ProjectRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))?;

    if !actor.is_admin() {
        let holder = ProjectHolderRepo::find_by_id(&mut conn, project.holder_id).await?;
        if holder.map(|h| h.client_id) != Some(actor.id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "this project belongs to another client".into(),
            )));
        }
    }
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    auth.require_admin(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let project = ProjectRepo::update(&mut conn, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades through the project's containers and everything they own.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.require_admin(&state.pool).await?;
    LifecycleManager::delete(&state.pool, EntityRef::Project(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
