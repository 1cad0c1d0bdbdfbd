//! Repository for the `submission` table.

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::submission::Submission;

const COLUMNS: &str = "id, container_id, client_id";

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Create a submission held by a client, not yet attached to a
    /// container. The unique constraint on `client_id` rejects a second
    /// in-flight submission for the same client.
    pub async fn create(
        conn: &mut SqliteConnection,
        client_id: &str,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!("INSERT INTO submission (client_id) VALUES (?) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Submission>(&query)
            .bind(client_id)
            .fetch_one(conn)
            .await
    }

    /// Set both halves of the container link (the container side is the
    /// unique constraint; the submission side is this column).
    pub async fn attach_container(
        conn: &mut SqliteConnection,
        id: DbId,
        container_id: DbId,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "UPDATE submission SET container_id = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(container_id)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submission WHERE id = ?");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_container(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submission WHERE container_id = ?");
        sqlx::query_as::<_, Submission>(&query)
            .bind(container_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_client(
        conn: &mut SqliteConnection,
        client_id: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submission WHERE client_id = ?");
        sqlx::query_as::<_, Submission>(&query)
            .bind(client_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submission ORDER BY id");
        sqlx::query_as::<_, Submission>(&query).fetch_all(conn).await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submission WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
