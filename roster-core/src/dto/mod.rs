//! Data Transfer Objects
//!
//! Request shapes accepted by the API. Each DTO carries its own validation so
//! handlers can reject bad input before the store is touched.

pub mod patch;
pub mod soldier;

use thiserror::Error;

/// A request body that deserialized but breaks a field rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} cannot be null")]
    Null(&'static str),
}
