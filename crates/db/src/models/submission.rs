use checker_core::types::{DbId, UserId};
use serde::Serialize;

/// A client's act of reviewing one container.
///
/// `container_id` is `None` between creation and attachment; the submission
/// workflow fills it in after the corrected records are merged.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Submission {
    pub id: DbId,
    pub container_id: Option<DbId>,
    pub client_id: UserId,
}
