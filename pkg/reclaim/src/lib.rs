//! Orphaned IP reconciliation: compare what a pool has handed out with what
//! load balancers and NAT rules actually use, and optionally give the rest back.

pub mod config;
pub mod error;
pub mod orphans;
pub mod usage;

use pkg_nsx::ReclaimApi;
use pkg_types::pool::PoolAllocation;
use tracing::{info, warn};

pub use config::{ReclaimArgs, ReclaimConfig};
pub use error::ReclaimError;
pub use usage::Usage;

/// Progress reported to the caller while reconciling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimEvent {
    Orphaned(String),
    Released(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub allocated: usize,
    pub orphaned: Vec<String>,
    pub released: usize,
}

/// Every address currently allocated from `pool_id`.
pub async fn fetch_allocations(
    api: &dyn ReclaimApi,
    pool_id: &str,
) -> Result<Vec<String>, ReclaimError> {
    let allocations = api
        .list_pool_allocations(pool_id)
        .await
        .map_err(|source| ReclaimError::Allocations {
            pool: pool_id.to_string(),
            source,
        })?;
    Ok(allocations.into_iter().map(|a| a.allocation_id).collect())
}

/// Release each address in order. The first failure aborts the rest.
pub async fn release_all(
    api: &dyn ReclaimApi,
    pool_id: &str,
    addresses: &[String],
    on_event: &mut dyn FnMut(&ReclaimEvent),
) -> Result<usize, ReclaimError> {
    for address in addresses {
        api.release_allocation(pool_id, &PoolAllocation::new(address))
            .await
            .map_err(|source| ReclaimError::Release {
                pool: pool_id.to_string(),
                address: address.clone(),
                source,
            })?;
        info!("Released {} back to pool {}", address, pool_id);
        on_event(&ReclaimEvent::Released(address.clone()));
    }
    Ok(addresses.len())
}

/// Full reconciliation. Releases happen only when `cfg.delete` is set.
pub async fn run(
    api: &dyn ReclaimApi,
    cfg: &ReclaimConfig,
    on_event: &mut dyn FnMut(&ReclaimEvent),
) -> Result<Summary, ReclaimError> {
    let allocated = fetch_allocations(api, &cfg.pool_id).await?;
    let usage = usage::collect(api, &cfg.t0_id).await?;
    let orphaned = orphans::find_orphans(&allocated, &usage);
    info!(
        "Pool {}: {} allocated, {} orphaned",
        cfg.pool_id,
        allocated.len(),
        orphaned.len()
    );

    for address in &orphaned {
        on_event(&ReclaimEvent::Orphaned(address.clone()));
    }

    let released = if cfg.delete {
        release_all(api, &cfg.pool_id, &orphaned, on_event).await?
    } else {
        if !orphaned.is_empty() {
            warn!("Dry run: pass --delete to release {} addresses", orphaned.len());
        }
        0
    };

    Ok(Summary {
        allocated: allocated.len(),
        orphaned,
        released,
    })
}
