//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods take `&mut SqliteConnection` so the lifecycle manager, the
//! reconciliation engine, and the workflows can compose several calls
//! inside one transaction; plain reads acquire a connection from the pool
//! at the call site.

pub mod container_repo;
pub mod csv_repo;
pub mod persistent_csv_repo;
pub mod persistent_record_repo;
pub mod project_holder_repo;
pub mod project_repo;
pub mod record_repo;
pub mod submission_repo;
pub mod user_repo;

pub use container_repo::ContainerRepo;
pub use csv_repo::CsvRepo;
pub use persistent_csv_repo::PersistentCsvRepo;
pub use persistent_record_repo::PersistentRecordRepo;
pub use project_holder_repo::ProjectHolderRepo;
pub use project_repo::ProjectRepo;
pub use record_repo::RecordRepo;
pub use submission_repo::SubmissionRepo;
pub use user_repo::UserRepo;
