//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use jobwire_domain::{JobWireError, TransportError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub JobWireError);

impl From<InfraError> for JobWireError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<JobWireError> for InfraError {
    fn from(value: JobWireError) -> Self {
        InfraError(value)
    }
}

impl InfraError {
    /// Convert a reqwest failure. Timeouts report `timeout`, the budget the
    /// failing client was built with.
    pub fn from_http(err: HttpError, timeout: Duration) -> Self {
        InfraError(err.into_jobwire(timeout))
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoJobWireError {
    fn into_jobwire(self, timeout: Duration) -> JobWireError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → JobWireError */
/* -------------------------------------------------------------------------- */

impl IntoJobWireError for HttpError {
    fn into_jobwire(self, timeout: Duration) -> JobWireError {
        if self.is_timeout() {
            return TransportError::Timeout(timeout).into();
        }

        if self.is_connect() {
            return TransportError::Network(format!("HTTP connection failure: {self}")).into();
        }

        if let Some(status) = self.status() {
            return TransportError::Status {
                status: status.as_u16(),
                url: self.url().map(ToString::to_string).unwrap_or_default(),
                body: String::new(),
            }
            .into();
        }

        if self.is_builder() {
            return JobWireError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return JobWireError::Serialization(format!("failed to decode HTTP body: {self}"));
        }

        TransportError::Network(self.to_string()).into()
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
