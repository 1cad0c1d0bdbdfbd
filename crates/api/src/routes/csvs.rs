//! Route definitions for the `/csvs` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::csvs;
use crate::state::AppState;

/// Routes mounted at `/csvs`.
///
/// ```text
/// DELETE /{id}         -> delete
/// GET    /{id}/records -> list_records
/// PATCH  /{id}/records -> merge_records
/// DELETE /{id}/records -> delete_records (by natural-key reference)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(csvs::delete))
        .route(
            "/{id}/records",
            get(csvs::list_records)
                .patch(csvs::merge_records)
                .delete(csvs::delete_records),
        )
}
