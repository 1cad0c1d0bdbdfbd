//! Repository for the `user_account` table.

use checker_core::types::UserId;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::models::user::{CreateUser, UpdateUser, User, UserRole};

/// Column list for user_account queries.
const COLUMNS: &str = "id, email, username, registration_date, role";

/// Provides CRUD operations for user accounts (both variants).
pub struct UserRepo;

impl UserRepo {
    /// Create a new user account, returning the created row.
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateUser,
        registration_date: NaiveDate,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_account (id, email, username, registration_date, role)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.id)
            .bind(&input.email)
            .bind(&input.username)
            .bind(registration_date)
            .bind(input.role)
            .fetch_one(conn)
            .await
    }

    /// Find a user by subject id.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_account WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a user by email (unique).
    pub async fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_account WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(conn)
            .await
    }

    /// List every user, ordered by registration date.
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_account ORDER BY registration_date, id");
        sqlx::query_as::<_, User>(&query).fetch_all(conn).await
    }

    /// List all users of one role, ordered by registration date.
    pub async fn list_by_role(
        conn: &mut SqliteConnection,
        role: UserRole,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_account WHERE role = ?
             ORDER BY registration_date, id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(conn)
            .await
    }

    /// Update a user's display name.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE user_account SET username = COALESCE(?, username)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Delete the row only; cascading is the lifecycle manager's job.
    pub async fn delete_row(
        conn: &mut SqliteConnection,
        id: &UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_account WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
