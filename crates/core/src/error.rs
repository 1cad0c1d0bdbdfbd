/// Domain error taxonomy.
///
/// Every recoverable failure the engine can produce maps to exactly one
/// variant; the API crate turns each variant into a distinct HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Already exists: {0}")]
    Exists(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Malformed upload: {0}")]
    Format(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common "looked up by id, nothing there" case.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
