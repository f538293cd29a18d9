//! # ReachKit Domain
//!
//! Wire-level types and models for the ReachKit campaign API.
//!
//! This crate contains:
//! - Per-resource record types (Campaign, Creator, Deal, Outreach, ...)
//! - Request payload types mirroring the backend's accepted bodies
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other ReachKit crates
//! - Only external dependencies allowed
//! - Pure data structures; field semantics are owned by the backend

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
