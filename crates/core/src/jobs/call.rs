//! One logical job operation and its two wire shapes.
//!
//! [`JobCall`] is the only place that knows, per operation, which route and
//! query parameters the REST transport uses and which positional arguments
//! the broker dispatcher expects. Keep both shapes side by side here so they
//! cannot drift apart.

use std::collections::BTreeMap;

use jobwire_domain::constants::{
    CONTAINER_ID, JOB_CMD_NAME, JOB_DATA_URI, JOB_ID, JOB_INSTANCES_BY_CMD_URI,
    JOB_INSTANCES_BY_CONTAINER_URI, JOB_INSTANCES_BY_KEY_URI,
    JOB_INSTANCES_BY_PROCESS_INSTANCE_URI, JOB_INSTANCE_URI, JOB_KEY, JOB_SERVICE, JOB_URI,
    PROCESS_INST_ID, STATUS_PARAM, WITH_DATA_PARAM, WITH_ERRORS_PARAM,
};
use jobwire_domain::{DescriptorCommand, JobData, JobRequestInstance, Pagination, Result};
use serde_json::{json, Value};

use super::marshalling::serialize_with;
use super::ports::Marshaller;
use super::query::QueryString;

/// HTTP verb used by a REST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

/// REST shape of a call: route template, its variables, query and body.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub verb: HttpVerb,
    pub template: &'static str,
    pub path_vars: BTreeMap<String, String>,
    pub query: QueryString,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
}

impl RestRequest {
    fn new(verb: HttpVerb, template: &'static str) -> Self {
        Self {
            verb,
            template,
            path_vars: BTreeMap::new(),
            query: QueryString::new(),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    fn var(mut self, name: &str, value: impl ToString) -> Self {
        self.path_vars.insert(name.to_string(), value.to_string());
        self
    }

    fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A single job-service operation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum JobCall {
    Schedule { container_id: String, request: JobRequestInstance },
    Cancel { request_id: i64 },
    UpdateData { request_id: i64, container_id: Option<String>, data: JobData },
    Requeue { request_id: i64 },
    ByStatus { statuses: Vec<String>, page: Pagination },
    /// `statuses: None` selects the overload without a status argument
    ByBusinessKey { business_key: String, statuses: Option<Vec<String>>, page: Pagination },
    ByCommand { command: String, statuses: Option<Vec<String>>, page: Pagination },
    ByContainer { container_id: String, statuses: Vec<String>, page: Pagination },
    ByProcessInstance { process_instance_id: i64, statuses: Vec<String>, page: Pagination },
    ById { request_id: i64, with_errors: bool, with_data: bool },
}

impl JobCall {
    /// Remote method name on the job service.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Schedule { .. } => "scheduleRequest",
            Self::Cancel { .. } => "cancelRequest",
            Self::UpdateData { .. } => "updateRequestData",
            Self::Requeue { .. } => "requeueRequest",
            Self::ByStatus { .. } => "getRequestsByStatus",
            Self::ByBusinessKey { .. } => "getRequestsByBusinessKey",
            Self::ByCommand { .. } => "getRequestsByCommand",
            Self::ByContainer { .. } => "getRequestsByContainer",
            Self::ByProcessInstance { .. } => "getRequestsByProcessInstance",
            Self::ById { .. } => "getRequestById",
        }
    }

    /// Build the broker command. Argument order is a wire contract.
    ///
    /// # Errors
    /// Returns `JobWireError::Serialization` if a payload cannot be marshalled.
    pub fn to_command(&self, marshaller: &dyn Marshaller) -> Result<DescriptorCommand> {
        let method = self.method_name();
        let format = marshaller.format();

        let command = match self {
            Self::Schedule { container_id, request } => {
                let payload = serialize_with(marshaller, request)?;
                DescriptorCommand::new(JOB_SERVICE, method, vec![json!(container_id)])?
                    .with_payload(payload, format)
            }
            Self::Cancel { request_id } | Self::Requeue { request_id } => {
                DescriptorCommand::new(JOB_SERVICE, method, vec![json!(request_id)])?
            }
            Self::UpdateData { request_id, container_id, data } => {
                let payload = serialize_with(marshaller, data)?;
                let container_id = container_id.clone().unwrap_or_default();
                DescriptorCommand::new(
                    JOB_SERVICE,
                    method,
                    vec![json!(request_id), json!(container_id)],
                )?
                .with_payload(payload, format)
            }
            Self::ByStatus { statuses, page } => DescriptorCommand::new(
                JOB_SERVICE,
                method,
                vec![json!(statuses), json!(page.page), json!(page.page_size)],
            )?,
            Self::ByBusinessKey { business_key: filter, statuses, page }
            | Self::ByCommand { command: filter, statuses, page } => {
                let mut args = vec![json!(filter)];
                if let Some(statuses) = statuses {
                    args.push(json!(statuses));
                }
                args.extend([json!(page.page), json!(page.page_size)]);
                DescriptorCommand::new(JOB_SERVICE, method, args)?
            }
            Self::ByContainer { container_id, statuses, page } => DescriptorCommand::new(
                JOB_SERVICE,
                method,
                vec![json!(container_id), json!(statuses), json!(page.page), json!(page.page_size)],
            )?,
            Self::ByProcessInstance { process_instance_id, statuses, page } => {
                DescriptorCommand::new(
                    JOB_SERVICE,
                    method,
                    vec![
                        json!(process_instance_id),
                        json!(statuses),
                        json!(page.page),
                        json!(page.page_size),
                    ],
                )?
            }
            Self::ById { request_id, with_errors, with_data } => DescriptorCommand::new(
                JOB_SERVICE,
                method,
                vec![json!(request_id), json!(with_errors), json!(with_data)],
            )?
            .with_format(format),
        };

        Ok(command)
    }

    /// Build the REST request.
    ///
    /// # Errors
    /// Returns `JobWireError::Serialization` if a body cannot be encoded.
    pub fn to_rest(&self) -> Result<RestRequest> {
        let request = match self {
            Self::Schedule { container_id, request } => {
                let mut rest = RestRequest::new(HttpVerb::Post, JOB_URI)
                    .var(CONTAINER_ID, container_id)
                    .body(serde_json::to_value(request)?);
                rest.query.push(CONTAINER_ID, container_id);
                rest
            }
            Self::Cancel { request_id } => {
                RestRequest::new(HttpVerb::Delete, JOB_INSTANCE_URI).var(JOB_ID, request_id)
            }
            Self::UpdateData { request_id, container_id, data } => {
                let mut rest = RestRequest::new(HttpVerb::Post, JOB_DATA_URI)
                    .var(JOB_ID, request_id)
                    .body(serde_json::to_value(data)?);
                rest.query.push_opt(CONTAINER_ID, container_id.as_deref().filter(|c| !c.is_empty()));
                rest
            }
            Self::Requeue { request_id } => RestRequest::new(HttpVerb::Put, JOB_INSTANCE_URI)
                .var(JOB_ID, request_id)
                .body(Value::String(String::new())),
            Self::ByStatus { statuses, page } => {
                let mut rest = RestRequest::new(HttpVerb::Get, JOB_URI);
                rest.query.push_all(STATUS_PARAM, statuses).paging(*page);
                rest
            }
            Self::ByBusinessKey { business_key, statuses, page } => {
                let mut rest = RestRequest::new(HttpVerb::Get, JOB_INSTANCES_BY_KEY_URI)
                    .var(JOB_KEY, business_key);
                rest.query.push_all(STATUS_PARAM, statuses.as_deref().unwrap_or_default()).paging(*page);
                rest
            }
            Self::ByCommand { command, statuses, page } => {
                let mut rest = RestRequest::new(HttpVerb::Get, JOB_INSTANCES_BY_CMD_URI)
                    .var(JOB_CMD_NAME, command);
                rest.query.push_all(STATUS_PARAM, statuses.as_deref().unwrap_or_default()).paging(*page);
                rest
            }
            Self::ByContainer { container_id, statuses, page } => {
                let mut rest = RestRequest::new(HttpVerb::Get, JOB_INSTANCES_BY_CONTAINER_URI)
                    .var(CONTAINER_ID, container_id);
                rest.query.push_all(STATUS_PARAM, statuses).paging(*page);
                rest
            }
            Self::ByProcessInstance { process_instance_id, statuses, page } => {
                let mut rest =
                    RestRequest::new(HttpVerb::Get, JOB_INSTANCES_BY_PROCESS_INSTANCE_URI)
                        .var(PROCESS_INST_ID, process_instance_id);
                rest.query.push_all(STATUS_PARAM, statuses).paging(*page);
                rest
            }
            Self::ById { request_id, with_errors, with_data } => {
                let mut rest =
                    RestRequest::new(HttpVerb::Get, JOB_INSTANCE_URI).var(JOB_ID, request_id);
                rest.query.push(WITH_ERRORS_PARAM, with_errors).push(WITH_DATA_PARAM, with_data);
                rest
            }
        };

        Ok(request)
    }
}
