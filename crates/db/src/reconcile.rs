//! Record reconciliation: bringing a working csv's record set in line with
//! an incoming batch.
//!
//! Two modes. Replace wipes and reloads (a raw detection file was
//! re-uploaded); merge upserts by natural key and never deletes (a client
//! corrected already-loaded records). Explicit deletion by natural-key
//! reference is a third, idempotent operation.
//!
//! The natural key `(csv_id, object_id)` is the business identity of a
//! record; surrogate ids never drive reconciliation.

use checker_core::detections::RecordValues;
use checker_core::error::CoreError;
use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::record::RecordPatch;
use crate::repositories::{CsvRepo, RecordRepo};
use crate::store_err;

/// The business identity of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct RecordKey {
    pub csv_id: DbId,
    pub object_id: i64,
}

/// Counts reported back from a merge, mostly for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub updated: usize,
    pub inserted: usize,
}

pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Replace mode: delete every record under the csv, then insert every
    /// incoming row fresh. The only path that removes records implicitly.
    ///
    /// Callers validate file structure (the detection parser) before this
    /// runs, so the wipe never happens on behalf of a malformed upload.
    pub async fn replace(
        conn: &mut SqliteConnection,
        csv_id: DbId,
        rows: &[RecordValues],
    ) -> Result<usize, CoreError> {
        require_csv(conn, csv_id).await?;

        RecordRepo::delete_all_by_csv(conn, csv_id)
            .await
            .map_err(store_err)?;

        for values in rows {
            RecordRepo::insert(conn, csv_id, values)
                .await
                .map_err(store_err)?;
        }

        tracing::debug!(csv_id, rows = rows.len(), "replaced csv records");
        Ok(rows.len())
    }

    /// Merge mode: upsert each incoming record by natural key.
    ///
    /// A hit updates the stored record's value fields in place, keeping
    /// its surrogate id and parent link. A miss inserts a fresh record
    /// owned by the csv; any surrogate id the caller sent along is
    /// ignored. Records absent from the batch are left untouched.
    pub async fn merge(
        conn: &mut SqliteConnection,
        csv_id: DbId,
        batch: &[RecordPatch],
    ) -> Result<MergeOutcome, CoreError> {
        require_csv(conn, csv_id).await?;

        let mut outcome = MergeOutcome::default();
        for patch in batch {
            let values = patch.values();
            match RecordRepo::find_by_key(conn, csv_id, patch.object_id)
                .await
                .map_err(store_err)?
            {
                Some(existing) => {
                    RecordRepo::update_values(conn, existing.id, &values)
                        .await
                        .map_err(store_err)?;
                    outcome.updated += 1;
                }
                None => {
                    RecordRepo::insert(conn, csv_id, &values)
                        .await
                        .map_err(store_err)?;
                    outcome.inserted += 1;
                }
            }
        }

        tracing::debug!(
            csv_id,
            updated = outcome.updated,
            inserted = outcome.inserted,
            "merged csv records"
        );
        Ok(outcome)
    }

    /// Explicitly delete records by natural-key reference.
    ///
    /// References that resolve to nothing are skipped silently; the
    /// operation is idempotent. Returns how many records were deleted.
    pub async fn delete_by_keys(
        conn: &mut SqliteConnection,
        keys: &[RecordKey],
    ) -> Result<usize, CoreError> {
        let mut deleted = 0;
        for key in keys {
            if let Some(record) = RecordRepo::find_by_key(conn, key.csv_id, key.object_id)
                .await
                .map_err(store_err)?
            {
                crate::lifecycle::LifecycleManager::delete_in_tx(
                    conn,
                    crate::lifecycle::EntityRef::Record(record.id),
                )
                .await?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

async fn require_csv(conn: &mut SqliteConnection, csv_id: DbId) -> Result<(), CoreError> {
    CsvRepo::find_by_id(conn, csv_id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Csv", csv_id))
        .map(|_| ())
}
