//! Repository for the `csv` table (working annotation sets).

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::csv::Csv;

const COLUMNS: &str = "id, container_id";

pub struct CsvRepo;

impl CsvRepo {
    /// Register the working csv for a container. The unique constraint on
    /// `container_id` rejects a second csv for the same container.
    pub async fn create(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<Csv, sqlx::Error> {
        let query = format!("INSERT INTO csv (container_id) VALUES (?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Csv>(&query)
            .bind(container_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Csv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM csv WHERE id = ?");
        sqlx::query_as::<_, Csv>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_container(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<Option<Csv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM csv WHERE container_id = ?");
        sqlx::query_as::<_, Csv>(&query)
            .bind(container_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Csv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM csv ORDER BY id");
        sqlx::query_as::<_, Csv>(&query).fetch_all(conn).await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM csv WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
