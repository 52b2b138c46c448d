//! Wire constants shared with the remote job service.
//!
//! Route templates and path-variable names must stay stable: the server
//! resolves them verbatim.

/// Service identifier the remote dispatcher routes job commands to.
pub const JOB_SERVICE: &str = "JobService";

/// Payload type announced on every broker envelope.
pub const DESCRIPTOR_COMMAND_TYPE: &str = "DescriptorCommand";

/// Routing tag for the business-process capability on the broker.
pub const BPM_ROUTING_TAG: &str = "BPM";

// Path variables
pub const JOB_ID: &str = "jobId";
pub const JOB_KEY: &str = "key";
pub const JOB_CMD_NAME: &str = "cmd";
pub const CONTAINER_ID: &str = "containerId";
pub const PROCESS_INST_ID: &str = "processInstanceId";

// Route templates, relative to the REST base URL
pub const JOB_URI: &str = "server/jobs";
pub const JOB_INSTANCE_URI: &str = "server/jobs/{jobId}";
pub const JOB_DATA_URI: &str = "server/jobs/{jobId}/data";
pub const JOB_INSTANCES_BY_KEY_URI: &str = "server/jobs/keys/{key}";
pub const JOB_INSTANCES_BY_CMD_URI: &str = "server/jobs/commands/{cmd}";
pub const JOB_INSTANCES_BY_CONTAINER_URI: &str = "server/jobs/containers/{containerId}";
pub const JOB_INSTANCES_BY_PROCESS_INSTANCE_URI: &str =
    "server/jobs/processes/instances/{processInstanceId}";

// Query parameter names
pub const STATUS_PARAM: &str = "status";
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const WITH_ERRORS_PARAM: &str = "withErrors";
pub const WITH_DATA_PARAM: &str = "withData";

/// Default REST timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default broker response timeout, in seconds.
pub const DEFAULT_BROKER_TIMEOUT_SECS: u64 = 30;
