//! HTTP handler functions, grouped by resource.

pub mod auth;
pub mod containers;
pub mod csvs;
pub mod projects;
pub mod submissions;
pub mod users;
