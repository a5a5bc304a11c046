use serde::{Deserialize, Serialize};

/// A load balancer service, which groups virtual servers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LbService {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub virtual_server_ids: Vec<String>,
}

/// A load balancer virtual server listening on a pool address.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LbVirtualServer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub ip_address: String,
}
