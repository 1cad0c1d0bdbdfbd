//! Client submission: merge corrected records into a container's working
//! csv and record the act as a submission, replacing any prior one for
//! the same container.

use checker_core::error::CoreError;
use checker_core::types::DbId;

use crate::lifecycle::{EntityRef, LifecycleManager};
use crate::models::record::RecordPatch;
use crate::models::submission::Submission;
use crate::reconcile::ReconciliationEngine;
use crate::repositories::{ContainerRepo, CsvRepo, SubmissionRepo, UserRepo};
use crate::{store_err, DbPool};

/// Submit corrected annotations for one container on behalf of a client.
///
/// Admins cannot submit. A stale submission already attached to the
/// container is deleted first, so re-submitting is idempotent: the merge
/// updates matching records in place and exactly one submission remains.
/// A client already holding a submission on a *different* container is
/// rejected by the store's uniqueness constraint with `Exists`.
pub async fn submit(
    pool: &DbPool,
    container_id: DbId,
    client_id: &str,
    corrected: &[RecordPatch],
) -> Result<Submission, CoreError> {
    let mut tx = pool.begin().await.map_err(store_err)?;

    let client = UserRepo::find_by_id(&mut tx, client_id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("User", client_id))?;
    if client.is_admin() {
        return Err(CoreError::Forbidden(
            "an admin cannot register a submission".into(),
        ));
    }

    ContainerRepo::find_by_id(&mut tx, container_id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Container", container_id))?;

    // Free the client from any stale hold on this container.
    if let Some(stale) = SubmissionRepo::find_by_container(&mut tx, container_id)
        .await
        .map_err(store_err)?
    {
        LifecycleManager::delete_in_tx(&mut tx, EntityRef::Submission(stale.id)).await?;
    }

    let submission = SubmissionRepo::create(&mut tx, client_id)
        .await
        .map_err(store_err)?;

    let csv = CsvRepo::find_by_container(&mut tx, container_id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Csv", container_id))?;
    ReconciliationEngine::merge(&mut tx, csv.id, corrected).await?;

    let submission = SubmissionRepo::attach_container(&mut tx, submission.id, container_id)
        .await
        .map_err(store_err)?;

    tx.commit().await.map_err(store_err)?;

    tracing::info!(
        submission_id = submission.id,
        container_id,
        client_id,
        records = corrected.len(),
        "registered submission"
    );
    Ok(submission)
}
