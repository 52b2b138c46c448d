//! In-process broker session backed by tokio channels.
//!
//! [`ChannelBroker`] is the client side: it publishes marshalled envelopes
//! and waits for the reply carrying the same correlation id. The
//! [`BrokerEndpoint`] is the server side, handed to whatever answers the
//! requests (a test double, an embedded dispatcher, a bridge to a real
//! queue).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use jobwire_core::BrokerSession;
use jobwire_domain::{
    BrokerConfig, CommandScript, JobWireError, Result, ServiceResponsesList, TransportError,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

type PendingReplies = Arc<DashMap<Uuid, oneshot::Sender<String>>>;

/// One published request as seen by the endpoint.
#[derive(Debug, Clone)]
pub struct BrokerMessage {
    pub correlation_id: Uuid,
    pub payload_type: String,
    pub routing_tag: String,
    pub body: String,
}

impl BrokerMessage {
    /// Parse the body back into the envelope that was sent.
    ///
    /// # Errors
    /// Returns `JobWireError::Serialization` if the body is not an envelope.
    pub fn envelope(&self) -> Result<CommandScript> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Client half of the in-process broker.
#[derive(Clone)]
pub struct ChannelBroker {
    outbound: mpsc::Sender<BrokerMessage>,
    pending: PendingReplies,
    timeout: Duration,
}

impl ChannelBroker {
    /// Create a broker with a bounded request queue.
    pub fn new(capacity: usize, timeout: Duration) -> (Self, BrokerEndpoint) {
        let (outbound, inbound) = mpsc::channel(capacity.max(1));
        let pending: PendingReplies = Arc::new(DashMap::new());

        let broker = Self { outbound, pending: pending.clone(), timeout };
        let endpoint = BrokerEndpoint { inbound, pending };
        (broker, endpoint)
    }

    pub fn from_config(config: &BrokerConfig) -> (Self, BrokerEndpoint) {
        Self::new(config.queue_capacity, config.timeout())
    }

    /// Requests still waiting for a reply
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    async fn exchange(&self, message: BrokerMessage, reply: oneshot::Receiver<String>) -> Result<String> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| TransportError::Broker("broker endpoint is closed".into()))?;

        reply
            .await
            .map_err(|_| TransportError::Broker("broker endpoint dropped the request".into()).into())
    }
}

#[async_trait]
impl BrokerSession for ChannelBroker {
    #[instrument(skip(self, envelope))]
    async fn send(
        &self,
        envelope: &CommandScript,
        payload_type: &str,
        routing_tag: &str,
    ) -> Result<ServiceResponsesList> {
        let correlation_id = Uuid::new_v4();
        let message = BrokerMessage {
            correlation_id,
            payload_type: payload_type.to_string(),
            routing_tag: routing_tag.to_string(),
            body: serde_json::to_string(envelope)?,
        };

        let (tx, rx) = oneshot::channel();
        self.pending.insert(correlation_id, tx);
        debug!(%correlation_id, "publishing envelope");

        let outcome = tokio::time::timeout(self.timeout, self.exchange(message, rx)).await;
        self.pending.remove(&correlation_id);

        let body = match outcome {
            Ok(result) => result?,
            Err(_) => {
                warn!(%correlation_id, timeout = ?self.timeout, "no broker reply in time");
                return Err(TransportError::Timeout(self.timeout).into());
            }
        };

        serde_json::from_str(&body).map_err(|e| {
            JobWireError::ProtocolViolation(format!("reply is not a response batch: {e}"))
        })
    }
}

/// Server half of the in-process broker.
pub struct BrokerEndpoint {
    inbound: mpsc::Receiver<BrokerMessage>,
    pending: PendingReplies,
}

impl BrokerEndpoint {
    /// Next published request, or `None` once every client half is gone.
    pub async fn recv(&mut self) -> Option<BrokerMessage> {
        self.inbound.recv().await
    }

    /// Deliver a raw reply body. Returns `false` if nobody is waiting for it
    /// any more.
    pub fn reply(&self, correlation_id: Uuid, body: impl Into<String>) -> bool {
        match self.pending.remove(&correlation_id) {
            Some((_, waiter)) => waiter.send(body.into()).is_ok(),
            None => false,
        }
    }

    /// Answer every request with `handler` until the client side is dropped.
    pub async fn serve<F>(mut self, mut handler: F)
    where
        F: FnMut(&BrokerMessage) -> ServiceResponsesList + Send,
    {
        while let Some(message) = self.recv().await {
            let batch = handler(&message);
            match serde_json::to_string(&batch) {
                Ok(body) => {
                    if !self.reply(message.correlation_id, body) {
                        debug!(correlation_id = %message.correlation_id, "reply arrived after the caller gave up");
                    }
                }
                Err(e) => warn!(error = %e, "failed to encode response batch"),
            }
        }
    }
}
