//! [`JobTransport`](jobwire_core::JobTransport) strategies

pub mod broker;
pub mod rest;

pub use broker::BrokerTransport;
pub use rest::{RestAuth, RestTransport};
