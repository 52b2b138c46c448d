//! Command envelope and service response models for the broker transport.
//!
//! A [`CommandScript`] carries one or more commands to the remote dispatcher;
//! this client always sends exactly one. The dispatcher answers with a
//! [`ServiceResponsesList`] holding one [`ServiceResponse`] per command.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{JobWireError, Result};

/// Payload format tag announced to the remote dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarshallingFormat {
    #[default]
    Json,
    Jaxb,
    Xstream,
}

impl MarshallingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jaxb => "xml",
            Self::Xstream => "xstream",
        }
    }
}

impl fmt::Display for MarshallingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarshallingFormat {
    type Err = JobWireError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" | "jaxb" => Ok(Self::Jaxb),
            "xstream" => Ok(Self::Xstream),
            other => Err(JobWireError::Config(format!("Unknown marshalling format: {other}"))),
        }
    }
}

/// One remote method invocation: target service, method name and the
/// positional arguments the dispatcher passes through unchanged.
///
/// Structured payloads are serialized before construction; the command only
/// ever holds their string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorCommand {
    pub service: String,
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    #[serde(rename = "marshaller-format", default, skip_serializing_if = "Option::is_none")]
    pub marshaller_format: Option<String>,

    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl DescriptorCommand {
    /// Build a command without payload.
    ///
    /// # Errors
    /// Returns `JobWireError::InvalidInput` if `service` or `method` is empty.
    pub fn new(
        service: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Result<Self> {
        let service = service.into();
        let method = method.into();
        if service.is_empty() {
            return Err(JobWireError::InvalidInput("command service must not be empty".into()));
        }
        if method.is_empty() {
            return Err(JobWireError::InvalidInput("command method must not be empty".into()));
        }
        Ok(Self { service, method, payload: None, marshaller_format: None, arguments })
    }

    /// Attach an already-serialized payload and the format it was written in.
    pub fn with_payload(mut self, payload: String, format: MarshallingFormat) -> Self {
        self.payload = Some(payload);
        self.marshaller_format = Some(format.as_str().to_string());
        self
    }

    /// Ask the dispatcher to marshal the result in `format`.
    pub fn with_format(mut self, format: MarshallingFormat) -> Self {
        self.marshaller_format = Some(format.as_str().to_string());
        self
    }
}

/// Commands understood by the remote dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "DescriptorCommand")]
    Descriptor(DescriptorCommand),
}

/// Batch envelope sent over the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandScript {
    #[serde(default)]
    pub lookup: Option<String>,
    pub commands: Vec<Command>,
}

impl CommandScript {
    /// Batch-of-one envelope.
    pub fn single(command: DescriptorCommand) -> Self {
        Self { lookup: None, commands: vec![Command::Descriptor(command)] }
    }
}

/// Outcome flag of a [`ServiceResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    Success,
    Failure,
    /// The command ran but produced nothing to return
    NoResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(rename = "type")]
    pub outcome: ResponseType,

    #[serde(default)]
    pub msg: String,

    /// Either an opaque marshalled string or an already structured value
    #[serde(default)]
    pub result: Option<Value>,
}

impl ServiceResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        Self { outcome: ResponseType::Success, msg: String::new(), result: Some(result.into()) }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self { outcome: ResponseType::Failure, msg: msg.into(), result: None }
    }

    pub fn no_response() -> Self {
        Self { outcome: ResponseType::NoResponse, msg: String::new(), result: None }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == ResponseType::Failure
    }

    /// True when there is nothing to deserialize.
    pub fn is_empty(&self) -> bool {
        self.outcome == ResponseType::NoResponse
            || matches!(self.result, None | Some(Value::Null))
    }
}

/// Responses for a whole [`CommandScript`], one per command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponsesList {
    #[serde(default)]
    pub responses: Vec<ServiceResponse>,
}

impl ServiceResponsesList {
    pub fn single(response: ServiceResponse) -> Self {
        Self { responses: vec![response] }
    }

    /// Take the only response of a batch-of-one.
    ///
    /// # Errors
    /// Returns `JobWireError::ProtocolViolation` if the batch does not hold
    /// exactly one response.
    pub fn into_single(self) -> Result<ServiceResponse> {
        let count = self.responses.len();
        let mut responses = self.responses.into_iter();
        match (responses.next(), count) {
            (Some(response), 1) => Ok(response),
            _ => Err(JobWireError::ProtocolViolation(format!(
                "expected exactly one response in batch, got {count}"
            ))),
        }
    }
}
