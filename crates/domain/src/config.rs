//! Client configuration structures
//!
//! The transport is chosen once, from [`ClientConfig::transport`], when the
//! client is built. Nothing here changes afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BROKER_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::errors::{JobWireError, Result};
use crate::types::MarshallingFormat;

/// Which wire binding a client talks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Synchronous HTTP request/response
    #[default]
    Rest,
    /// Command envelopes over a message broker session
    Broker,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => f.write_str("rest"),
            Self::Broker => f.write_str("broker"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = JobWireError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rest" | "http" => Ok(Self::Rest),
            "broker" | "jms" | "mq" => Ok(Self::Broker),
            other => Err(JobWireError::Config(format!("Unknown transport: {other}"))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: TransportKind,
    #[serde(default)]
    pub rest: RestConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub marshalling: MarshallingFormat,
}

/// REST transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL of the server's REST API
    /// (e.g. "http://localhost:8080/kie-server/services/rest")
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total HTTP attempts per call (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Bearer token, used instead of basic credentials when set
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

/// Broker transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// How long to wait for the correlated response
    #[serde(default = "default_broker_timeout_secs")]
    pub timeout_secs: u64,
    /// Outstanding requests buffered before senders wait
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_broker_timeout_secs() -> u64 {
    DEFAULT_BROKER_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    1
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/kie-server/services/rest".to_string(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            username: None,
            password: None,
            token: None,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_broker_timeout_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl RestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BrokerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ClientConfig {
    /// Check the settings the selected transport depends on.
    ///
    /// # Errors
    /// Returns `JobWireError::Config` describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.marshalling != MarshallingFormat::Json {
            return Err(JobWireError::Config(format!(
                "Unsupported marshalling format: {}",
                self.marshalling
            )));
        }

        match self.transport {
            TransportKind::Rest => {
                if self.rest.base_url.trim().is_empty() {
                    return Err(JobWireError::Config("REST base URL must not be empty".into()));
                }
                if self.rest.timeout_secs == 0 {
                    return Err(JobWireError::Config("REST timeout must be positive".into()));
                }
                if self.rest.max_attempts == 0 {
                    return Err(JobWireError::Config("max_attempts must be at least 1".into()));
                }
                if self.rest.password.is_some() && self.rest.username.is_none() {
                    return Err(JobWireError::Config("password set without username".into()));
                }
            }
            TransportKind::Broker => {
                if self.broker.timeout_secs == 0 {
                    return Err(JobWireError::Config("broker timeout must be positive".into()));
                }
                if self.broker.queue_capacity == 0 {
                    return Err(JobWireError::Config(
                        "broker queue capacity must be positive".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}
