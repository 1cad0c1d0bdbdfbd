//! Repository for the `persistent_record` table (snapshot rows).

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::record::PersistentRecord;

const COLUMNS: &str = "id, persistent_csv_id, frame_num, object_id, label, tracker_l, \
    tracker_t, tracker_w, tracker_h, model_confidence, tracker_confidence";

pub struct PersistentRecordRepo;

impl PersistentRecordRepo {
    /// Copy every record under a working csv into the snapshot csv, with
    /// fresh surrogate ids. Runs once per ingestion.
    pub async fn snapshot_from_csv(
        conn: &mut SqliteConnection,
        persistent_csv_id: DbId,
        csv_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO persistent_record
                (persistent_csv_id, frame_num, object_id, label, tracker_l,
                 tracker_t, tracker_w, tracker_h, model_confidence,
                 tracker_confidence)
             SELECT ?, frame_num, object_id, label, tracker_l, tracker_t,
                    tracker_w, tracker_h, model_confidence, tracker_confidence
             FROM record WHERE csv_id = ?",
        )
        .bind(persistent_csv_id)
        .bind(csv_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_by_csv(
        conn: &mut SqliteConnection,
        persistent_csv_id: DbId,
    ) -> Result<Vec<PersistentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persistent_record
             WHERE persistent_csv_id = ?
             ORDER BY frame_num, object_id"
        );
        sqlx::query_as::<_, PersistentRecord>(&query)
            .bind(persistent_csv_id)
            .fetch_all(conn)
            .await
    }

    pub async fn count_by_csv(
        conn: &mut SqliteConnection,
        persistent_csv_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM persistent_record WHERE persistent_csv_id = ?")
            .bind(persistent_csv_id)
            .fetch_one(conn)
            .await
    }

    pub async fn delete_all_by_csv(
        conn: &mut SqliteConnection,
        persistent_csv_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persistent_record WHERE persistent_csv_id = ?")
            .bind(persistent_csv_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
