use pkg_nsx::ReclaimApi;
use pkg_types::loadbalancer::{LbService, LbVirtualServer};
use pkg_types::nat::NatRule;
use tracing::debug;

use crate::error::ReclaimError;

/// Addresses known to be in use, by consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    /// Virtual server addresses, deduplicated, first-seen order.
    pub load_balancer: Vec<String>,
    /// NAT translated addresses, as listed.
    pub nat: Vec<String>,
}

impl Usage {
    /// Load balancer addresses followed by NAT addresses.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.load_balancer
            .iter()
            .chain(self.nat.iter())
            .map(String::as_str)
    }
}

/// Addresses of every virtual server referenced by a service.
pub fn lb_addresses(services: &[LbService], virtual_servers: &[LbVirtualServer]) -> Vec<String> {
    let mut addresses: Vec<String> = Vec::new();
    for vs_id in services.iter().flat_map(|s| s.virtual_server_ids.iter()) {
        for vs in virtual_servers.iter().filter(|vs| &vs.id == vs_id) {
            if vs.ip_address.is_empty() || addresses.contains(&vs.ip_address) {
                continue;
            }
            addresses.push(vs.ip_address.clone());
        }
    }
    addresses
}

pub fn nat_addresses(rules: &[NatRule]) -> Vec<String> {
    rules
        .iter()
        .filter_map(|r| r.translated_network.clone())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Gather load balancer and NAT usage. The virtual server collection is
/// fetched once and shared by every service.
pub async fn collect(api: &dyn ReclaimApi, router_id: &str) -> Result<Usage, ReclaimError> {
    let services = api
        .list_lb_services()
        .await
        .map_err(ReclaimError::LoadBalancer)?;
    let virtual_servers = api
        .list_lb_virtual_servers()
        .await
        .map_err(ReclaimError::LoadBalancer)?;
    let load_balancer = lb_addresses(&services, &virtual_servers);
    debug!(
        "{} services, {} virtual servers, {} load balancer addresses",
        services.len(),
        virtual_servers.len(),
        load_balancer.len()
    );

    let rules = api
        .list_nat_rules(router_id)
        .await
        .map_err(|source| ReclaimError::Nat {
            router: router_id.to_string(),
            source,
        })?;
    let nat = nat_addresses(&rules);
    debug!("{} NAT rules on {}, {} translated addresses", rules.len(), router_id, nat.len());

    Ok(Usage { load_balancer, nat })
}
