use pkg_nsx::ApiError;
use thiserror::Error;

/// Any failure aborts the reconciliation; later stages never run on partial data.
#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error("failed to list allocations of pool {pool}: {source}")]
    Allocations {
        pool: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to list load balancer addresses: {0}")]
    LoadBalancer(#[source] ApiError),

    #[error("failed to list NAT rules of router {router}: {source}")]
    Nat {
        router: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to release {address} from pool {pool}: {source}")]
    Release {
        pool: String,
        address: String,
        #[source]
        source: ApiError,
    },
}
