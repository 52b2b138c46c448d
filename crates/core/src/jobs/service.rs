//! Job services facade - one method per remote job operation

use std::sync::Arc;

use jobwire_domain::{
    JobData, JobRequestInstance, Pagination, RequestInfoInstance, RequestInfoInstanceList, Result,
    TransportKind,
};
use tracing::{debug, instrument};

use super::call::JobCall;
use super::ports::{JobTransport, Marshaller, RawResult};
use super::resolver;

/// Client for the remote job service.
///
/// The transport strategy is injected once; every method builds a
/// [`JobCall`], hands it to that transport and resolves the raw result.
/// List queries never return `None`: an absent or empty remote list comes
/// back as an empty `Vec`.
#[derive(Clone)]
pub struct JobServicesClient {
    transport: Arc<dyn JobTransport>,
    marshaller: Arc<dyn Marshaller>,
}

impl JobServicesClient {
    pub fn new(transport: Arc<dyn JobTransport>, marshaller: Arc<dyn Marshaller>) -> Self {
        Self { transport, marshaller }
    }

    /// Transport this client was built with
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Schedule a job outside of any container.
    ///
    /// Returns the generated request id, or `None` when the server sent no
    /// content.
    pub async fn schedule_request(&self, request: &JobRequestInstance) -> Result<Option<i64>> {
        self.schedule_request_in("", request).await
    }

    /// Schedule a job within `container_id`.
    ///
    /// # Errors
    /// - `RemoteOperation` if the server rejects the job
    /// - `Coercion` if the returned id is not numeric
    /// - `Transport` for HTTP or broker failures
    #[instrument(skip(self, request), fields(command = %request.command))]
    pub async fn schedule_request_in(
        &self,
        container_id: &str,
        request: &JobRequestInstance,
    ) -> Result<Option<i64>> {
        let call = JobCall::Schedule {
            container_id: container_id.to_string(),
            request: request.clone(),
        };
        let raw = self.dispatch(&call).await?;
        resolver::resolve_id(raw, self.marshaller.as_ref())
    }

    #[instrument(skip(self))]
    pub async fn cancel_request(&self, request_id: i64) -> Result<()> {
        let raw = self.dispatch(&JobCall::Cancel { request_id }).await?;
        resolver::resolve_unit(raw)
    }

    /// Replace the data attached to a queued request.
    #[instrument(skip(self, data))]
    pub async fn update_request_data(
        &self,
        request_id: i64,
        container_id: Option<&str>,
        data: &JobData,
    ) -> Result<()> {
        let call = JobCall::UpdateData {
            request_id,
            container_id: container_id.map(str::to_string),
            data: data.clone(),
        };
        let raw = self.dispatch(&call).await?;
        resolver::resolve_unit(raw)
    }

    /// Put a failed or cancelled request back on the queue.
    #[instrument(skip(self))]
    pub async fn requeue_request(&self, request_id: i64) -> Result<()> {
        let raw = self.dispatch(&JobCall::Requeue { request_id }).await?;
        resolver::resolve_unit(raw)
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_status(
        &self,
        statuses: &[String],
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByStatus { statuses: statuses.to_vec(), page }).await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_business_key(
        &self,
        business_key: &str,
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByBusinessKey {
            business_key: business_key.to_string(),
            statuses: None,
            page,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_business_key_and_status(
        &self,
        business_key: &str,
        statuses: &[String],
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByBusinessKey {
            business_key: business_key.to_string(),
            statuses: Some(statuses.to_vec()),
            page,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_command(
        &self,
        command: &str,
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByCommand { command: command.to_string(), statuses: None, page })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_command_and_status(
        &self,
        command: &str,
        statuses: &[String],
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByCommand {
            command: command.to_string(),
            statuses: Some(statuses.to_vec()),
            page,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_container(
        &self,
        container_id: &str,
        statuses: &[String],
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByContainer {
            container_id: container_id.to_string(),
            statuses: statuses.to_vec(),
            page,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_requests_by_process_instance(
        &self,
        process_instance_id: i64,
        statuses: &[String],
        page: Pagination,
    ) -> Result<Vec<RequestInfoInstance>> {
        self.list(JobCall::ByProcessInstance {
            process_instance_id,
            statuses: statuses.to_vec(),
            page,
        })
        .await
    }

    /// Fetch a single request. `None` means the server had nothing to return.
    #[instrument(skip(self))]
    pub async fn get_request_by_id(
        &self,
        request_id: i64,
        with_errors: bool,
        with_data: bool,
    ) -> Result<Option<RequestInfoInstance>> {
        let raw = self.dispatch(&JobCall::ById { request_id, with_errors, with_data }).await?;
        resolver::resolve(raw, self.marshaller.as_ref())
    }

    async fn list(&self, call: JobCall) -> Result<Vec<RequestInfoInstance>> {
        let raw = self.dispatch(&call).await?;
        let list: Option<RequestInfoInstanceList> =
            resolver::resolve(raw, self.marshaller.as_ref())?;
        let items = list.map(RequestInfoInstanceList::into_vec).unwrap_or_default();
        debug!(method = call.method_name(), count = items.len(), "job query resolved");
        Ok(items)
    }

    async fn dispatch(&self, call: &JobCall) -> Result<RawResult> {
        debug!(method = call.method_name(), transport = %self.transport.kind(), "dispatching job call");
        self.transport.execute(call).await
    }
}
