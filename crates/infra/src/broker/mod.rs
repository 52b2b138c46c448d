//! Broker session adapters

pub mod channel;

pub use channel::{BrokerEndpoint, BrokerMessage, ChannelBroker};
