use checker_core::types::DbId;
use serde::Serialize;

/// The mutable, currently-editable annotation set for a container.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Csv {
    pub id: DbId,
    pub container_id: DbId,
}

/// An immutable point-in-time copy of a working csv, created exactly once
/// during ingestion and never mutated afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PersistentCsv {
    pub id: DbId,
    pub container_id: DbId,
}
