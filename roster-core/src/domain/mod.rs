//! Core domain types
//!
//! These types represent records as they exist in the store and as they are
//! returned to API clients.

pub mod soldier;
