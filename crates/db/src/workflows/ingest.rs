//! Container ingestion: turn three uploaded artifacts (detection CSV,
//! class-label file, reference to an uploaded video blob) into a fully
//! populated container under a project.

use checker_core::detections::parse_detections;
use checker_core::error::CoreError;
use checker_core::labels::parse_labels;
use checker_core::probe::FrameRateProbe;
use checker_core::types::DbId;

use crate::models::container::{Container, CreateContainer};
use crate::reconcile::ReconciliationEngine;
use crate::repositories::{
    ContainerRepo, CsvRepo, PersistentCsvRepo, PersistentRecordRepo, ProjectRepo,
};
use crate::{store_err, DbPool};

/// Everything the ingestion workflow needs from the upload request.
#[derive(Debug, Clone)]
pub struct IngestInput {
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    /// Reference to the already-uploaded video blob, handed to the probe.
    pub blob_name: String,
    pub video_file_name: String,
    pub csv_file_name: String,
    /// Raw text of the class-label upload.
    pub labels_text: String,
    /// Raw text of the detection CSV upload.
    pub detections_text: String,
}

/// Ingest a new container.
///
/// The frame-rate probe runs before the transaction opens (it is an
/// external call with nothing to roll back), and both uploads are parsed
/// up front so a malformed file can never leave half-written state. From
/// container registration through the audit snapshot everything commits
/// or nothing does.
pub async fn ingest_container(
    pool: &DbPool,
    probe: &dyn FrameRateProbe,
    input: IngestInput,
) -> Result<Container, CoreError> {
    // Cheap existence check before paying for the probe.
    {
        let mut conn = pool.acquire().await.map_err(store_err)?;
        ProjectRepo::find_by_id(&mut conn, input.project_id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| CoreError::not_found("Project", input.project_id))?;
    }

    let frame_rate = probe.frame_rate(&input.blob_name).await?;

    let labels = parse_labels(&input.labels_text);
    let rows = parse_detections(&input.detections_text)?;

    let mut tx = pool.begin().await.map_err(store_err)?;

    // The project may have vanished between the pre-check and now.
    ProjectRepo::find_by_id(&mut tx, input.project_id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Project", input.project_id))?;

    let container = ContainerRepo::create(
        &mut tx,
        &CreateContainer {
            project_id: input.project_id,
            name: input.name.clone(),
            description: input.description.clone(),
            blob_name: input.blob_name.clone(),
            frame_rate,
            video_file_name: input.video_file_name.clone(),
            csv_file_name: input.csv_file_name.clone(),
        },
    )
    .await
    .map_err(store_err)?;

    ContainerRepo::set_classes(&mut tx, container.id, &labels)
        .await
        .map_err(store_err)?;

    let csv = CsvRepo::create(&mut tx, container.id).await.map_err(store_err)?;
    ReconciliationEngine::replace(&mut tx, csv.id, &rows).await?;

    let snapshot = PersistentCsvRepo::create(&mut tx, container.id)
        .await
        .map_err(store_err)?;
    PersistentRecordRepo::snapshot_from_csv(&mut tx, snapshot.id, csv.id)
        .await
        .map_err(store_err)?;

    tx.commit().await.map_err(store_err)?;

    tracing::info!(
        container_id = container.id,
        project_id = input.project_id,
        records = rows.len(),
        classes = labels.len(),
        frame_rate,
        "ingested container"
    );
    Ok(container)
}
