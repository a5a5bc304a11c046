use serde::{Deserialize, Serialize};

/// An address leased out of an IP pool.
///
/// The manager uses the address itself as the allocation identifier, and the
/// same shape is posted back to release it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolAllocation {
    pub allocation_id: String,
}

impl PoolAllocation {
    pub fn new(allocation_id: &str) -> Self {
        Self {
            allocation_id: allocation_id.to_string(),
        }
    }
}
