use checker_core::types::{DbId, UserId};
use serde::{Deserialize, Serialize};

/// A unit of work assigned by an admin to a client's project holder.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub admin_id: UserId,
    pub holder_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub admin_id: UserId,
    pub holder_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
}
