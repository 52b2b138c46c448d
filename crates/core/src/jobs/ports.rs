//! Port interfaces for job dispatch
//!
//! The facade talks to exactly one [`JobTransport`], chosen when the client
//! is built. Transports in turn rely on the narrower collaborator ports:
//! a [`BrokerSession`] for the envelope transport and a [`UrlBuilder`] for
//! the REST transport. Both share a [`Marshaller`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use jobwire_domain::{
    CommandScript, MarshallingFormat, Result, ServiceResponse, ServiceResponsesList,
    TransportKind,
};
use serde_json::Value;

use super::call::JobCall;

/// Undecoded result of one transport round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// REST body, already parsed as JSON; `None` for an empty or 204 body
    Body(Option<Value>),
    /// The single response of a broker batch
    Service(ServiceResponse),
}

/// Strategy that executes a [`JobCall`] over one wire binding.
#[async_trait]
pub trait JobTransport: Send + Sync {
    /// Which binding this strategy implements
    fn kind(&self) -> TransportKind;

    /// Send the call and return the raw result.
    ///
    /// Transport failures are returned as `JobWireError::Transport`;
    /// server FAILURE outcomes are left for the resolver.
    async fn execute(&self, call: &JobCall) -> Result<RawResult>;
}

/// Broker session collaborator: publishes an envelope and waits for the
/// correlated response batch.
///
/// Correlation and timeouts are the session's job.
#[async_trait]
pub trait BrokerSession: Send + Sync {
    async fn send(
        &self,
        envelope: &CommandScript,
        payload_type: &str,
        routing_tag: &str,
    ) -> Result<ServiceResponsesList>;
}

/// Converts between structured values and the configured wire format.
pub trait Marshaller: Send + Sync {
    /// Format tag sent with marshalled payloads
    fn format(&self) -> MarshallingFormat;

    fn marshall(&self, value: &Value) -> Result<String>;

    fn unmarshall(&self, raw: &str) -> Result<Value>;
}

/// Expands a route template against a base URL.
pub trait UrlBuilder: Send + Sync {
    /// Substitute every `{name}` placeholder in `template` from `vars` and
    /// join the result onto `base`.
    ///
    /// # Errors
    /// Returns `JobWireError::InvalidInput` when a placeholder has no value.
    fn build(&self, base: &str, template: &str, vars: &BTreeMap<String, String>)
        -> Result<String>;
}
