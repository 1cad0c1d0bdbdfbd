//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where the entity
//!   has caller-mutable metadata

pub mod container;
pub mod csv;
pub mod project;
pub mod project_holder;
pub mod record;
pub mod submission;
pub mod user;
