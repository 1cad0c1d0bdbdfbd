pub mod auth;
pub mod containers;
pub mod csvs;
pub mod health;
pub mod projects;
pub mod submissions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/me                             current account (registers on first login)
///
/// /users                               list (admin)
/// /users/{id}                          get, rename, delete
///
/// /projects                            list, create (admin)
/// /projects/{id}                       get, update, delete
///
/// /containers                          list, create via multipart ingestion (admin)
/// /containers/{id}                     get, update metadata, delete
/// /containers/{id}/classes             class-label list
/// /containers/{id}/records             working annotation set
/// /containers/{id}/snapshot-records    ingestion-time snapshot
/// /containers/{id}/submission          submit corrected records (client)
///
/// /csvs/{id}                           delete working set
/// /csvs/{id}/records                   list, merge (PATCH), delete by key (DELETE)
///
/// /submissions                         list
/// /submissions/{id}                    get, revoke
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/containers", containers::router())
        .nest("/csvs", csvs::router())
        .nest("/submissions", submissions::router())
}
