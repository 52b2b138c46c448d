//! Job dispatch: call table, ports, response resolution and the facade

pub mod call;
pub mod marshalling;
pub mod ports;
pub mod query;
pub mod resolver;
pub mod service;

pub use call::{HttpVerb, JobCall, RestRequest};
pub use marshalling::{deserialize_with, serialize_with, JsonMarshaller};
pub use ports::{BrokerSession, JobTransport, Marshaller, RawResult, UrlBuilder};
pub use query::QueryString;
pub use service::JobServicesClient;
