//! Builds a [`JobServicesClient`] with the transport chosen by configuration.
//!
//! The transport is picked exactly once, here. The client never looks at the
//! configuration again.

use std::sync::Arc;

use jobwire_core::{BrokerSession, JobServicesClient, JobTransport, JsonMarshaller, Marshaller};
use jobwire_domain::{ClientConfig, JobWireError, Result, TransportKind};
use tracing::info;

use crate::broker::{BrokerEndpoint, ChannelBroker};
use crate::transport::{BrokerTransport, RestTransport};

/// Build a client from validated configuration.
///
/// `broker` is the session used when the broker transport is selected and is
/// ignored for REST.
///
/// # Errors
/// - `Config` if the configuration is invalid or the broker transport is
///   selected without a session
/// - any error raised while building the HTTP client
pub fn build_client(
    config: &ClientConfig,
    broker: Option<Arc<dyn BrokerSession>>,
) -> Result<JobServicesClient> {
    config.validate()?;

    let marshaller: Arc<dyn Marshaller> = Arc::new(JsonMarshaller);
    let transport: Arc<dyn JobTransport> = match config.transport {
        TransportKind::Rest => Arc::new(RestTransport::from_config(&config.rest)?),
        TransportKind::Broker => {
            let session = broker.ok_or_else(|| {
                JobWireError::Config("broker transport selected but no broker session given".into())
            })?;
            Arc::new(BrokerTransport::new(session, marshaller.clone()))
        }
    };

    info!(transport = %config.transport, format = %marshaller.format(), "job services client ready");
    Ok(JobServicesClient::new(transport, marshaller))
}

/// Build a broker-backed client over a fresh in-process [`ChannelBroker`].
///
/// The returned endpoint must be served for calls to complete.
///
/// # Errors
/// Returns `Config` if the configuration is invalid.
pub fn connect_in_process(config: &ClientConfig) -> Result<(JobServicesClient, BrokerEndpoint)> {
    let config = ClientConfig { transport: TransportKind::Broker, ..config.clone() };
    let (broker, endpoint) = ChannelBroker::from_config(&config.broker);
    let session: Arc<dyn BrokerSession> = Arc::new(broker);
    let client = build_client(&config, Some(session))?;
    Ok((client, endpoint))
}
