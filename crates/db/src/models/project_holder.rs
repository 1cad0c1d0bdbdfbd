use checker_core::types::{DbId, UserId};
use serde::Serialize;

/// A client's project portfolio; exactly one per client.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectHolder {
    pub id: DbId,
    pub client_id: UserId,
}
