#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobwire_core::BrokerSession;
use jobwire_domain::{CommandScript, Command, DescriptorCommand, Result, ServiceResponse, ServiceResponsesList};

/// What the client published for one call.
#[derive(Debug, Clone)]
pub struct SentEnvelope {
    pub envelope: CommandScript,
    pub payload_type: String,
    pub routing_tag: String,
}

impl SentEnvelope {
    /// The single descriptor command inside the envelope.
    pub fn command(&self) -> &DescriptorCommand {
        assert_eq!(self.envelope.commands.len(), 1, "envelope should hold one command");
        let Command::Descriptor(command) = &self.envelope.commands[0];
        command
    }
}

/// Broker session double that captures the last envelope and answers from a
/// queue of canned batches.
///
/// Reading the captured envelope clears it, so each assertion sees only what
/// the call under test sent.
#[derive(Default)]
pub struct RecordingBrokerSession {
    last: Mutex<Option<SentEnvelope>>,
    replies: Mutex<VecDeque<ServiceResponsesList>>,
}

impl RecordingBrokerSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a single-response batch.
    pub fn respond(&self, response: ServiceResponse) {
        self.respond_batch(ServiceResponsesList::single(response));
    }

    pub fn respond_batch(&self, batch: ServiceResponsesList) {
        self.replies.lock().unwrap().push_back(batch);
    }

    /// Take the last captured envelope, leaving nothing behind.
    pub fn take_last(&self) -> Option<SentEnvelope> {
        self.last.lock().unwrap().take()
    }
}

#[async_trait]
impl BrokerSession for RecordingBrokerSession {
    async fn send(
        &self,
        envelope: &CommandScript,
        payload_type: &str,
        routing_tag: &str,
    ) -> Result<ServiceResponsesList> {
        *self.last.lock().unwrap() = Some(SentEnvelope {
            envelope: envelope.clone(),
            payload_type: payload_type.to_string(),
            routing_tag: routing_tag.to_string(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| ServiceResponsesList::single(ServiceResponse::no_response())))
    }
}
