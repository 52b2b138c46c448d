//! HTTP plumbing for the REST transport.
//!
//! One request per call unless `RestConfig::max_attempts` asks for more. When
//! retries are enabled, only 5xx answers and connection-level failures are
//! repeated, with exponential backoff between attempts.

use std::time::Duration;

use jobwire_domain::constants::DEFAULT_TIMEOUT_SECS;
use jobwire_domain::JobWireError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF_DOUBLINGS: u32 = 8;

/// How many times a job request may be sent and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RetryPolicy {
    max_attempts: usize,
    backoff: Duration,
}

impl RetryPolicy {
    fn has_attempts_after(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before `attempt` (1-based), doubling from the second retry on.
    fn delay_before(&self, attempt: usize) -> Duration {
        let doublings = (attempt.saturating_sub(2) as u32).min(MAX_BACKOFF_DOUBLINGS);
        self.backoff.saturating_mul(1u32 << doublings)
    }
}

/// reqwest client carrying the job service timeout and retry budget.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with the default timeout and a single attempt.
    pub fn new() -> Result<Self, JobWireError> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Map a reqwest failure, reporting timeouts with this client's budget.
    pub fn map_error(&self, err: reqwest::Error) -> JobWireError {
        InfraError::from_http(err, self.timeout).into()
    }

    /// Send `builder`, retrying while the policy allows it.
    ///
    /// # Errors
    /// - `Transport(Timeout)` when the request exceeds the configured timeout
    /// - `Transport(Network)` for connection failures
    /// - `InvalidInput` when a retried body cannot be cloned or the request is malformed
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, JobWireError> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    JobWireError::InvalidInput("streamed request bodies cannot be resent".into())
                })?
                .build()
                .map_err(|err| self.map_error(err))?;

            let (method, url) = (request.method().clone(), request.url().clone());
            debug!(attempt, %method, %url, "sending job request");

            let outcome = self.client.execute(request).await;
            let retry = self.retry.has_attempts_after(attempt)
                && match &outcome {
                    Ok(response) => response.status().is_server_error(),
                    Err(err) => is_transient(err),
                };

            match outcome {
                Ok(response) if !retry => return Ok(response),
                Err(err) if !retry => return Err(self.map_error(err)),
                Ok(response) => {
                    debug!(attempt, %url, status = %response.status(), "server error, retrying");
                }
                Err(err) => debug!(attempt, %url, error = %err, "request failed, retrying"),
            }

            attempt += 1;
            let delay = self.retry.delay_before(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy { max_attempts: 1, backoff: DEFAULT_BACKOFF },
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of sends per call, the first one included.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    /// Wait before the first retry; later retries double it.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, JobWireError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|err| JobWireError::from(InfraError::from_http(err, self.timeout)))?;

        Ok(HttpClient { client, timeout: self.timeout, retry: self.retry })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}
