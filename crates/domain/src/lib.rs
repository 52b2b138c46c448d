//! # JobWire Domain
//!
//! Wire types and models for the remote job services client.
//!
//! This crate contains:
//! - Job request / request info models
//! - The broker command envelope and service response types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Wire constants (route templates, service names)
//!
//! ## Architecture
//! - No dependencies on other JobWire crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
