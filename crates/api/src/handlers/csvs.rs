//! Handlers for working csvs, their records, and audit snapshots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use checker_core::error::CoreError;
use checker_core::types::DbId;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::record::{PersistentRecord, Record, RecordPatch};
use checker_db::reconcile::{RecordKey, ReconciliationEngine};
use checker_db::repositories::{CsvRepo, PersistentCsvRepo, PersistentRecordRepo, RecordRepo};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/csvs/{id}/records
pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Record>>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    CsvRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Csv", id)))?;
    let records = RecordRepo::list_by_csv(&mut conn, id).await?;
    Ok(Json(records))
}

/// PATCH /api/v1/csvs/{id}/records
///
/// Merge a corrected batch into the working csv by natural key. Admin
/// correction path; client corrections go through the submission
/// endpoint instead.
pub async fn merge_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(batch): Json<Vec<RecordPatch>>,
) -> AppResult<Json<Value>> {
    auth.require_admin(&state.pool).await?;

    let mut tx = state.pool.begin().await?;
    let outcome = ReconciliationEngine::merge(&mut tx, id, &batch).await?;
    tx.commit().await?;

    Ok(Json(json!({
        "updated": outcome.updated,
        "inserted": outcome.inserted,
    })))
}

/// DELETE /api/v1/csvs/{id}/records
///
/// Body is a JSON array of object ids. References that resolve to
/// nothing are skipped; the response reports how many records went away.
pub async fn delete_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(object_ids): Json<Vec<i64>>,
) -> AppResult<Json<Value>> {
    auth.require_admin(&state.pool).await?;

    let keys: Vec<RecordKey> = object_ids
        .into_iter()
        .map(|object_id| RecordKey {
            csv_id: id,
            object_id,
        })
        .collect();

    let mut tx = state.pool.begin().await?;
    CsvRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Csv", id)))?;
    let deleted = ReconciliationEngine::delete_by_keys(&mut tx, &keys).await?;
    tx.commit().await?;

    Ok(Json(json!({ "deleted": deleted })))
}

/// DELETE /api/v1/csvs/{id}
///
/// Drop the working annotation set and its records. The owning container
/// survives with its snapshot; a re-upload can load a fresh set later.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.require_admin(&state.pool).await?;
    LifecycleManager::delete(&state.pool, EntityRef::Csv(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/containers/{id}/snapshot-records
///
/// The immutable point-in-time copy taken at ingestion, for comparing a
/// client's corrections against what the models originally produced.
pub async fn snapshot_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(container_id): Path<DbId>,
) -> AppResult<Json<Vec<PersistentRecord>>> {
    auth.resolve(&state.pool).await?;

    let mut conn = state.pool.acquire().await?;
    let snapshot = PersistentCsvRepo::find_by_container(&mut conn, container_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Container", container_id)))?;
    let records = PersistentRecordRepo::list_by_csv(&mut conn, snapshot.id).await?;
    Ok(Json(records))
}
