//! # JobWire Core
//!
//! Transport-agnostic dispatch logic - no HTTP or broker code.
//!
//! This crate contains:
//! - The per-operation call table ([`JobCall`]) producing both wire shapes
//! - Port/adapter interfaces (traits) for transports and collaborators
//! - Response resolution and the [`JobServicesClient`] facade
//!
//! ## Architecture Principles
//! - Only depends on `jobwire-domain`
//! - All external dependencies via traits
//! - Pure, testable dispatch logic

pub mod jobs;

// Re-export specific items to avoid ambiguity
pub use jobs::{
    BrokerSession, HttpVerb, JobCall, JobServicesClient, JobTransport, JsonMarshaller,
    Marshaller, QueryString, RawResult, RestRequest, UrlBuilder,
};
