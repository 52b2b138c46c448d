//! Job request and job status models exchanged with the remote job service.
//!
//! Field names follow the server's kebab-case wire names. Every field the
//! server may leave out is optional so partially populated payloads (for
//! example `withData=false`) still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_wire_status_conversions;

/// Arbitrary key/value data attached to a job.
pub type JobData = Map<String, Value>;

/// Lifecycle status of an executor request on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Queued,
    Running,
    Retrying,
    Done,
    Cancelled,
    Error,
}

impl_wire_status_conversions!(RequestStatus {
    Queued => "QUEUED",
    Running => "RUNNING",
    Retrying => "RETRYING",
    Done => "DONE",
    Cancelled => "CANCELLED",
    Error => "ERROR",
});

impl RequestStatus {
    /// Build the string filter list accepted by the query operations.
    pub fn filter(statuses: &[RequestStatus]) -> Vec<String> {
        statuses.iter().map(ToString::to_string).collect()
    }
}

/// A job to be scheduled by the remote executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequestInstance {
    /// Fully qualified command the executor runs
    #[serde(rename = "job-command")]
    pub command: String,

    #[serde(rename = "scheduled-date", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,

    #[serde(rename = "request-data", default)]
    pub data: JobData,
}

impl JobRequestInstance {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), scheduled_date: None, data: JobData::new() }
    }

    pub fn scheduled_at(mut self, when: DateTime<Utc>) -> Self {
        self.scheduled_date = Some(when);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Error recorded by the executor for one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfoInstance {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(rename = "request-id", default)]
    pub request_id: Option<i64>,

    #[serde(rename = "error-message", default)]
    pub message: Option<String>,

    #[serde(rename = "error-stacktrace", default)]
    pub stacktrace: Option<String>,

    #[serde(rename = "error-date", default)]
    pub error_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfoInstanceList {
    #[serde(rename = "error-info-instance", default)]
    pub items: Option<Vec<ErrorInfoInstance>>,
}

impl ErrorInfoInstanceList {
    pub fn into_vec(self) -> Vec<ErrorInfoInstance> {
        self.items.unwrap_or_default()
    }
}

/// Server-side view of a scheduled job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestInfoInstance {
    #[serde(rename = "request-instance-id", default)]
    pub id: Option<i64>,

    #[serde(rename = "request-status", default)]
    pub status: Option<String>,

    #[serde(rename = "request-message", default)]
    pub message: Option<String>,

    #[serde(rename = "request-retries", default)]
    pub retries: Option<i32>,

    #[serde(rename = "request-executions", default)]
    pub executions: Option<i32>,

    #[serde(rename = "request-command", default)]
    pub command_name: Option<String>,

    #[serde(rename = "request-business-key", default)]
    pub business_key: Option<String>,

    #[serde(rename = "request-scheduled-date", default)]
    pub scheduled_date: Option<DateTime<Utc>>,

    #[serde(rename = "request-data", default)]
    pub data: Option<JobData>,

    #[serde(rename = "response-data", default)]
    pub response_data: Option<JobData>,

    #[serde(rename = "request-errors", default)]
    pub errors: Option<ErrorInfoInstanceList>,

    #[serde(rename = "request-process-instance-id", default)]
    pub process_instance_id: Option<i64>,

    #[serde(rename = "request-container-id", default)]
    pub container_id: Option<String>,
}

impl RequestInfoInstance {
    /// Parsed status, when the server sent a recognised one.
    pub fn request_status(&self) -> Option<RequestStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Page of request infos as returned by the list queries.
///
/// The server sends `null` (or omits the field) when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestInfoInstanceList {
    #[serde(rename = "request-info-instance", default)]
    pub items: Option<Vec<RequestInfoInstance>>,
}

impl RequestInfoInstanceList {
    pub fn into_vec(self) -> Vec<RequestInfoInstance> {
        self.items.unwrap_or_default()
    }
}
