//! Repository for the `record` table (working annotation rows).

use checker_core::detections::RecordValues;
use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::record::Record;

const COLUMNS: &str = "id, csv_id, frame_num, object_id, label, tracker_l, tracker_t, \
    tracker_w, tracker_h, model_confidence, tracker_confidence";

pub struct RecordRepo;

impl RecordRepo {
    /// Insert a fresh record owned by a csv. The surrogate id is always
    /// generated here; callers never supply one.
    pub async fn insert(
        conn: &mut SqliteConnection,
        csv_id: DbId,
        values: &RecordValues,
    ) -> Result<Record, sqlx::Error> {
        let query = format!(
            "INSERT INTO record
                (csv_id, frame_num, object_id, label, tracker_l, tracker_t,
                 tracker_w, tracker_h, model_confidence, tracker_confidence)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(csv_id)
            .bind(values.frame_num)
            .bind(values.object_id)
            .bind(&values.label)
            .bind(values.tracker_l)
            .bind(values.tracker_t)
            .bind(values.tracker_w)
            .bind(values.tracker_h)
            .bind(values.model_confidence)
            .bind(values.tracker_confidence)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM record WHERE id = ?");
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Resolve a record through its natural key.
    pub async fn find_by_key(
        conn: &mut SqliteConnection,
        csv_id: DbId,
        object_id: i64,
    ) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM record WHERE csv_id = ? AND object_id = ?");
        sqlx::query_as::<_, Record>(&query)
            .bind(csv_id)
            .bind(object_id)
            .fetch_optional(conn)
            .await
    }

    /// List a csv's records ordered by frame, then object id.
    pub async fn list_by_csv(
        conn: &mut SqliteConnection,
        csv_id: DbId,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM record WHERE csv_id = ? ORDER BY frame_num, object_id"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(csv_id)
            .fetch_all(conn)
            .await
    }

    pub async fn count_by_csv(
        conn: &mut SqliteConnection,
        csv_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM record WHERE csv_id = ?")
            .bind(csv_id)
            .fetch_one(conn)
            .await
    }

    /// Overwrite a record's value fields in place; identity (surrogate id
    /// and csv link) is untouched.
    pub async fn update_values(
        conn: &mut SqliteConnection,
        id: DbId,
        values: &RecordValues,
    ) -> Result<Record, sqlx::Error> {
        let query = format!(
            "UPDATE record SET
                frame_num = ?, label = ?, tracker_l = ?, tracker_t = ?,
                tracker_w = ?, tracker_h = ?, model_confidence = ?,
                tracker_confidence = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(values.frame_num)
            .bind(&values.label)
            .bind(values.tracker_l)
            .bind(values.tracker_t)
            .bind(values.tracker_w)
            .bind(values.tracker_h)
            .bind(values.model_confidence)
            .bind(values.tracker_confidence)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM record WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Wipe every record under a csv; the replace path and csv deletion.
    pub async fn delete_all_by_csv(
        conn: &mut SqliteConnection,
        csv_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM record WHERE csv_id = ?")
            .bind(csv_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
