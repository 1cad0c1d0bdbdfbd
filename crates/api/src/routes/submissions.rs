//! Route definitions for the `/submissions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Routes mounted at `/submissions`.
///
/// ```text
/// GET    /       -> list
/// GET    /{id}   -> get_by_id
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(submissions::list))
        .route(
            "/{id}",
            get(submissions::get_by_id).delete(submissions::delete),
        )
}
