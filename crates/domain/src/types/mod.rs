//! Wire types exchanged with the remote job service

pub mod command;
pub mod jobs;
pub mod query;
pub mod wrapped;

pub use command::{
    Command, CommandScript, DescriptorCommand, MarshallingFormat, ResponseType, ServiceResponse,
    ServiceResponsesList,
};
pub use jobs::{
    ErrorInfoInstance, ErrorInfoInstanceList, JobData, JobRequestInstance, RequestInfoInstance,
    RequestInfoInstanceList, RequestStatus,
};
pub use query::Pagination;
pub use wrapped::Wrapped;
