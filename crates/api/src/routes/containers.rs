//! Route definitions for the `/containers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{containers, csvs};
use crate::state::AppState;

/// Routes mounted at `/containers`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create (multipart ingestion)
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// GET    /{id}/classes             -> classes
/// GET    /{id}/records             -> records
/// GET    /{id}/snapshot-records    -> snapshot_records
/// POST   /{id}/submission          -> create_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(containers::list).post(containers::create))
        .route(
            "/{id}",
            get(containers::get_by_id)
                .put(containers::update)
                .delete(containers::delete),
        )
        .route("/{id}/classes", get(containers::classes))
        .route("/{id}/records", get(containers::records))
        .route("/{id}/snapshot-records", get(csvs::snapshot_records))
        .route("/{id}/submission", post(containers::create_submission))
}
