use checker_core::types::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discriminant of the user sum type: one table, two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
}

/// A human actor. Admins assign projects; clients review containers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Subject id issued by the upstream identity provider.
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub registration_date: NaiveDate,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Insert DTO. The registration date is always set server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

/// Patch DTO; only the display name is caller-mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
}
