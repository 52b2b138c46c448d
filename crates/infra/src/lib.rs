//! # JobWire Infrastructure
//!
//! Adapters implementing the ports defined in `jobwire-core`.
//!
//! This crate contains:
//! - The reqwest-based HTTP client and the REST transport
//! - The broker transport and an in-process channel broker session
//! - Configuration loading and tracing setup
//! - The factory that picks the transport once
//!
//! ## Architecture
//! - Implements traits defined in `jobwire-core`
//! - Depends on `jobwire-domain` and `jobwire-core`
//! - Contains all "impure" code (network, channels, files, env)

pub mod broker;
pub mod config;
pub mod errors;
pub mod factory;
pub mod http;
pub mod observability;
pub mod transport;

// Re-export commonly used items
pub use broker::{BrokerEndpoint, BrokerMessage, ChannelBroker};
pub use errors::InfraError;
pub use factory::{build_client, connect_in_process};
pub use http::{HttpClient, HttpClientBuilder, PathTemplateUrlBuilder};
pub use transport::{BrokerTransport, RestAuth, RestTransport};
