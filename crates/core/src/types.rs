/// Surrogate primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// User accounts are keyed by the subject id issued upstream (the `oid`
/// claim), not by a local rowid.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
