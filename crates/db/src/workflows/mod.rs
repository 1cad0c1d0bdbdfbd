//! Multi-step orchestration workflows: container ingestion and client
//! submission. Each public entry point is one transaction against the
//! store; any failure rolls the whole call back.

pub mod ingest;
pub mod submission;
