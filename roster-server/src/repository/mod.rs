//! Repository Module
//!
//! Data access layer for the service.
//! Repositories translate store faults into the small set of errors the API
//! maps to status codes. Absence is returned as `None`/`false`, never as an
//! error.

pub mod soldier;

// Re-export for convenience
pub use soldier as soldier_repository;
