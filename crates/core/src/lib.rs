//! Domain logic shared by the persistence and API crates.
//!
//! Everything here is free of database and HTTP concerns: the error
//! taxonomy, the upload parsers, bearer-claims decoding, and the video
//! frame-rate probe abstraction.

pub mod claims;
pub mod detections;
pub mod error;
pub mod labels;
pub mod probe;
pub mod types;
