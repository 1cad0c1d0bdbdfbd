//! Repository for the `container` and `container_class` tables.

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::container::{Container, CreateContainer, UpdateContainer};

const COLUMNS: &str =
    "id, project_id, name, description, blob_name, frame_rate, video_file_name, csv_file_name";

pub struct ContainerRepo;

impl ContainerRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateContainer,
    ) -> Result<Container, sqlx::Error> {
        let query = format!(
            "INSERT INTO container
                (project_id, name, description, blob_name, frame_rate,
                 video_file_name, csv_file_name)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Container>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.blob_name)
            .bind(input.frame_rate)
            .bind(&input.video_file_name)
            .bind(&input.csv_file_name)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Container>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM container WHERE id = ?");
        sqlx::query_as::<_, Container>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Container>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM container ORDER BY id");
        sqlx::query_as::<_, Container>(&query).fetch_all(conn).await
    }

    pub async fn list_by_project(
        conn: &mut SqliteConnection,
        project_id: DbId,
    ) -> Result<Vec<Container>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM container WHERE project_id = ? ORDER BY id");
        sqlx::query_as::<_, Container>(&query)
            .bind(project_id)
            .fetch_all(conn)
            .await
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &UpdateContainer,
    ) -> Result<Option<Container>, sqlx::Error> {
        let query = format!(
            "UPDATE container SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                frame_rate = COALESCE(?, frame_rate)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Container>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.frame_rate)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM container WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- class label list ---

    /// Replace the container's ordered class-label list.
    pub async fn set_classes(
        conn: &mut SqliteConnection,
        container_id: DbId,
        labels: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM container_class WHERE container_id = ?")
            .bind(container_id)
            .execute(&mut *conn)
            .await?;

        for (position, label) in labels.iter().enumerate() {
            sqlx::query(
                "INSERT INTO container_class (container_id, position, label) VALUES (?, ?, ?)",
            )
            .bind(container_id)
            .bind(position as i64)
            .bind(label)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// The container's class labels in file order.
    pub async fn classes(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT label FROM container_class WHERE container_id = ? ORDER BY position",
        )
        .bind(container_id)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(|(label,)| label).collect())
    }

    /// Drop the class-label rows for a container being deleted.
    pub async fn delete_classes(
        conn: &mut SqliteConnection,
        container_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM container_class WHERE container_id = ?")
            .bind(container_id)
            .execute(conn)
            .await
            .map(|_| ())
    }
}
