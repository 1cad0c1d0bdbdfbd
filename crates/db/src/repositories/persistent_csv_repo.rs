//! Repository for the `persistent_csv` table (audit snapshots).

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::csv::PersistentCsv;

const COLUMNS: &str = "id, container_id";

pub struct PersistentCsvRepo;

impl PersistentCsvRepo {
    /// Register the snapshot csv for a container; rejected by the unique
    /// constraint if the container already has one.
    pub async fn create(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<PersistentCsv, sqlx::Error> {
        let query =
            format!("INSERT INTO persistent_csv (container_id) VALUES (?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, PersistentCsv>(&query)
            .bind(container_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<PersistentCsv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persistent_csv WHERE id = ?");
        sqlx::query_as::<_, PersistentCsv>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_container(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<Option<PersistentCsv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persistent_csv WHERE container_id = ?");
        sqlx::query_as::<_, PersistentCsv>(&query)
            .bind(container_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persistent_csv WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
