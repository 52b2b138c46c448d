//! REST binding of the job transport

use std::sync::Arc;

use async_trait::async_trait;
use jobwire_core::{HttpVerb, JobCall, JobTransport, RawResult, UrlBuilder};
use jobwire_domain::{JobWireError, RestConfig, Result, TransportError, TransportKind};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::http::{HttpClient, PathTemplateUrlBuilder};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Credentials attached to every REST request.
#[derive(Clone, PartialEq, Eq)]
pub enum RestAuth {
    Basic { username: String, password: Option<String> },
    Bearer(String),
}

impl std::fmt::Debug for RestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => {
                f.debug_struct("Basic").field("username", username).finish_non_exhaustive()
            }
            Self::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl RestAuth {
    /// Token wins over basic credentials when both are configured.
    pub fn from_config(config: &RestConfig) -> Option<Self> {
        if let Some(token) = config.token.clone() {
            return Some(Self::Bearer(token));
        }
        config
            .username
            .clone()
            .map(|username| Self::Basic { username, password: config.password.clone() })
    }
}

/// Executes job calls as HTTP requests against the server's REST API.
pub struct RestTransport {
    http: HttpClient,
    base_url: String,
    urls: Arc<dyn UrlBuilder>,
    auth: Option<RestAuth>,
}

impl RestTransport {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            urls: Arc::new(PathTemplateUrlBuilder),
            auth: None,
        }
    }

    /// Build the transport and its HTTP client from configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &RestConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self::new(http, config.base_url.clone()).with_auth(RestAuth::from_config(config)))
    }

    pub fn with_auth(mut self, auth: Option<RestAuth>) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_url_builder(mut self, urls: Arc<dyn UrlBuilder>) -> Self {
        self.urls = urls;
        self
    }

    async fn read_body(&self, response: Response, url: &str) -> Result<RawResult> {
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(url = %url, error = %err, "could not read error response body");
                    format!("<unreadable body: {err}>")
                }
            };
            return Err(map_status_error(status, url, body));
        }

        // 204/205 carry no body by definition
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return Ok(RawResult::Body(None));
        }

        let text = response.text().await.map_err(|e| self.http.map_error(e))?;
        if text.trim().is_empty() {
            return Ok(RawResult::Body(None));
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            JobWireError::Serialization(format!("Failed to parse response from {url}: {e}"))
        })?;
        Ok(RawResult::Body(Some(value)))
    }
}

#[async_trait]
impl JobTransport for RestTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Rest
    }

    #[instrument(skip(self, call), fields(method = call.method_name()))]
    async fn execute(&self, call: &JobCall) -> Result<RawResult> {
        let rest = call.to_rest()?;
        let mut url = self.urls.build(&self.base_url, rest.template, &rest.path_vars)?;
        url.push_str(rest.query.as_str());

        debug!(verb = ?rest.verb, url = %url, "REST job request");

        let mut request =
            self.http.request(method_for(rest.verb), url.as_str()).header(ACCEPT, JSON_MEDIA_TYPE);

        for (name, value) in &rest.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match &self.auth {
            Some(RestAuth::Basic { username, password }) => {
                request.basic_auth(username, password.as_deref())
            }
            Some(RestAuth::Bearer(token)) => request.bearer_auth(token),
            None => request,
        };

        if let Some(body) = &rest.body {
            let raw = match body {
                // Raw strings go out verbatim; everything else as JSON
                Value::String(raw) => raw.clone(),
                other => serde_json::to_string(other)?,
            };
            request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(raw);
        }

        let response = self.http.send(request).await?;
        self.read_body(response, &url).await
    }
}

fn method_for(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Delete => Method::DELETE,
    }
}

fn map_status_error(status: StatusCode, url: &str, body: String) -> JobWireError {
    warn!(status = status.as_u16(), url = %url, "job service returned an error status");
    TransportError::Status { status: status.as_u16(), url: url.to_string(), body }.into()
}
