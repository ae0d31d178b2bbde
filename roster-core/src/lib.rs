//! Roster Core
//!
//! Core types for the Roster soldier records service.
//!
//! This crate contains:
//! - Domain types: the stored `Soldier` record as the API returns it
//! - DTOs: request bodies for creating and partially updating soldiers

pub mod domain;
pub mod dto;
