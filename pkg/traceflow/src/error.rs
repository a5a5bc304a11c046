use pkg_nsx::ApiError;
use pkg_types::traceflow::OperationState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceflowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no logical port found for pod '{pod}' in namespace '{namespace}'")]
    EndpointNotFound { pod: String, namespace: String },

    #[error("logical port {port_id} of pod '{pod}' has no address binding")]
    NoAddressBinding { pod: String, port_id: String },

    #[error("traceflow {id} did not finish correctly (state: {state})")]
    NotFinished { id: String, state: OperationState },

    #[error("traceflow {id} still in progress after {polls} status checks")]
    PollLimitExceeded { id: String, polls: u32 },
}
