//! Repository for the `project_holder` table.

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::project_holder::ProjectHolder;

const COLUMNS: &str = "id, client_id";

pub struct ProjectHolderRepo;

impl ProjectHolderRepo {
    /// Create the holder for a client. The unique constraint on
    /// `client_id` rejects a second holder for the same client.
    pub async fn create(
        conn: &mut SqliteConnection,
        client_id: &str,
    ) -> Result<ProjectHolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_holder (client_id) VALUES (?) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectHolder>(&query)
            .bind(client_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<ProjectHolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_holder WHERE id = ?");
        sqlx::query_as::<_, ProjectHolder>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_client(
        conn: &mut SqliteConnection,
        client_id: &str,
    ) -> Result<Option<ProjectHolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_holder WHERE client_id = ?");
        sqlx::query_as::<_, ProjectHolder>(&query)
            .bind(client_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_holder WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
