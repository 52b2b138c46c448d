//! Message-broker binding of the job transport

use std::sync::Arc;

use async_trait::async_trait;
use jobwire_core::{BrokerSession, JobCall, JobTransport, Marshaller, RawResult};
use jobwire_domain::constants::{BPM_ROUTING_TAG, DESCRIPTOR_COMMAND_TYPE};
use jobwire_domain::{CommandScript, Result, TransportKind};
use tracing::{debug, instrument};

/// Wraps each call in a single-command envelope and sends it through a
/// [`BrokerSession`].
pub struct BrokerTransport {
    session: Arc<dyn BrokerSession>,
    marshaller: Arc<dyn Marshaller>,
}

impl BrokerTransport {
    pub fn new(session: Arc<dyn BrokerSession>, marshaller: Arc<dyn Marshaller>) -> Self {
        Self { session, marshaller }
    }
}

#[async_trait]
impl JobTransport for BrokerTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Broker
    }

    #[instrument(skip(self, call), fields(method = call.method_name()))]
    async fn execute(&self, call: &JobCall) -> Result<RawResult> {
        let command = call.to_command(self.marshaller.as_ref())?;
        let envelope = CommandScript::single(command);

        let batch = self.session.send(&envelope, DESCRIPTOR_COMMAND_TYPE, BPM_ROUTING_TAG).await?;
        debug!(responses = batch.responses.len(), "broker batch received");

        Ok(RawResult::Service(batch.into_single()?))
    }
}
