//! Repository for the `project` table.

use checker_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::project::{CreateProject, Project, UpdateProject};

const COLUMNS: &str = "id, title, description, admin_id, holder_id";

pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO project (title, description, admin_id, holder_id)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.admin_id)
            .bind(input.holder_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project WHERE id = ?");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project ORDER BY id");
        sqlx::query_as::<_, Project>(&query).fetch_all(conn).await
    }

    /// List the projects in one client's portfolio.
    pub async fn list_by_holder(
        conn: &mut SqliteConnection,
        holder_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project WHERE holder_id = ? ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(holder_id)
            .fetch_all(conn)
            .await
    }

    /// List the projects an admin has assigned.
    pub async fn list_by_admin(
        conn: &mut SqliteConnection,
        admin_id: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project WHERE admin_id = ? ORDER BY id");
        sqlx::query_as::<_, Project>(&query)
            .bind(admin_id)
            .fetch_all(conn)
            .await
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE project SET
                title = COALESCE(?, title),
                description = COALESCE(?, description)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn delete_row(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
