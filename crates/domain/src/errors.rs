//! Error types used throughout the client

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by the HTTP or broker collaborator.
///
/// These are surfaced to callers unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("{url} returned status {status}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("network failure: {0}")]
    Network(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("broker failure: {0}")]
    Broker(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// HTTP status code, when the failure came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Main error type for the job services client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum JobWireError {
    /// The server processed the command and reported a FAILURE outcome.
    #[error("Remote operation failed: {0}")]
    RemoteOperation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A result could not be interpreted as the expected type.
    #[error("Coercion error: {0}")]
    Coercion(String),

    /// The broker answered with something other than exactly one response.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl JobWireError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::RemoteOperation(_))
    }
}

impl From<serde_json::Error> for JobWireError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, JobWireError>;
