use std::sync::Arc;

use checker_core::probe::FrameRateProbe;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: checker_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Frame-rate probe used by container ingestion. Trait object so tests
    /// can swap the ffprobe-backed implementation for a canned one.
    pub probe: Arc<dyn FrameRateProbe>,
}
