use checker_core::types::DbId;
use serde::{Deserialize, Serialize};

/// One annotated video asset under a project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Container {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    /// Reference to the already-uploaded video blob.
    pub blob_name: String,
    /// Average frame rate probed from the blob at ingestion time.
    pub frame_rate: f64,
    pub video_file_name: String,
    pub csv_file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContainer {
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub blob_name: String,
    pub frame_rate: f64,
    pub video_file_name: String,
    pub csv_file_name: String,
}

/// Patch DTO; only presentation metadata is mutable after ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContainer {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frame_rate: Option<f64>,
}
