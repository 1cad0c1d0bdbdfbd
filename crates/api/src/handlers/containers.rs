//! Handlers for the `/containers` resource.
//!
//! Creation is a multipart upload (detection CSV, class-label file, and a
//! reference to the already-uploaded video blob) that runs the full
//! ingestion workflow.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use checker_core::error::CoreError;
use checker_core::types::DbId;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::container::{Container, UpdateContainer};
use checker_db::models::record::{Record, RecordPatch};
use checker_db::models::submission::Submission;
use checker_db::repositories::{ContainerRepo, CsvRepo, RecordRepo};
use checker_db::workflows::ingest::{ingest_container, IngestInput};
use checker_db::workflows::submission::submit;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListContainersQuery {
    pub project_id: Option<DbId>,
}

/// POST /api/v1/containers (multipart/form-data)
///
/// Text parts: `project_id`, `name`, `description`, `blob_name`, and an
/// optional `video_file_name` (defaults to the blob name). File parts:
/// `detections` (the raw CSV) and `classes` (one label per line).
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Container>)> {
    auth.require_admin(&state.pool).await?;

    let mut project_id: Option<DbId> = None;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut blob_name: Option<String> = None;
    let mut video_file_name: Option<String> = None;
    let mut csv_file_name: Option<String> = None;
    let mut detections_text: Option<String> = None;
    let mut labels_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field_name.as_str() {
            "project_id" => {
                let raw = field.text().await?;
                let id = raw.parse().map_err(|_| {
                    AppError::BadRequest(format!("project_id is not an integer: {raw}"))
                })?;
                project_id = Some(id);
            }
            "name" => name = Some(field.text().await?),
            "description" => description = Some(field.text().await?),
            "blob_name" => blob_name = Some(field.text().await?),
            "video_file_name" => video_file_name = Some(field.text().await?),
            "detections" => {
                csv_file_name = field.file_name().map(str::to_owned);
                detections_text = Some(field.text().await?);
            }
            "classes" => labels_text = Some(field.text().await?),
            other => {
                return Err(AppError::BadRequest(format!(
                    "unexpected multipart field: {other}"
                )));
            }
        }
    }

    let input = IngestInput {
        project_id: require_part(project_id, "project_id")?,
        name: require_part(name, "name")?,
        description: description.unwrap_or_default(),
        blob_name: require_part(blob_name.clone(), "blob_name")?,
        video_file_name: video_file_name
            .or(blob_name)
            .unwrap_or_default(),
        csv_file_name: csv_file_name.unwrap_or_else(|| "detections.csv".into()),
        labels_text: require_part(labels_text, "classes")?,
        detections_text: require_part(detections_text, "detections")?,
    };

    let container = ingest_container(&state.pool, state.probe.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(container)))
}

fn require_part<T>(part: Option<T>, name: &str) -> Result<T, AppError> {
    part.ok_or_else(|| AppError::BadRequest(format!("missing multipart field: {name}")))
}

/// GET /api/v1/containers?project_id=1
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListContainersQuery>,
) -> AppResult<Json<Vec<Container>>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let containers = match query.project_id {
        Some(project_id) => ContainerRepo::list_by_project(&mut conn, project_id).await?,
        None => ContainerRepo::list(&mut conn).await?,
    };
    Ok(Json(containers))
}

/// GET /api/v1/containers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Container>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let container = ContainerRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Container", id)))?;
    Ok(Json(container))
}

/// PUT /api/v1/containers/{id}
///
/// Only presentation metadata is mutable; the blob reference and file
/// names are fixed at ingestion.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContainer>,
) -> AppResult<Json<Container>> {
    auth.require_admin(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let container = ContainerRepo::update(&mut conn, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Container", id)))?;
    Ok(Json(container))
}

/// DELETE /api/v1/containers/{id}
///
/// Cascades through the working csv, the audit snapshot, the class list,
/// and any submission attached to the container.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.require_admin(&state.pool).await?;
    LifecycleManager::delete(&state.pool, EntityRef::Container(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/containers/{id}/classes
pub async fn classes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<String>>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    ContainerRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Container", id)))?;
    let classes = ContainerRepo::classes(&mut conn, id).await?;
    Ok(Json(classes))
}

/// GET /api/v1/containers/{id}/records
///
/// The container's working annotation set.
pub async fn records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Record>>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let csv = CsvRepo::find_by_container(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Container", id)))?;
    let records = RecordRepo::list_by_csv(&mut conn, csv.id).await?;
    Ok(Json(records))
}

/// POST /api/v1/containers/{id}/submission
///
/// Submit corrected records for review. Client accounts only; the
/// workflow merges the batch into the working csv and records the act.
pub async fn create_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(batch): Json<Vec<RecordPatch>>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let actor = auth.resolve(&state.pool).await?;
    let submission = submit(&state.pool, id, &actor.id, &batch).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}
