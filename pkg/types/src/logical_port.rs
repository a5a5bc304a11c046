use serde::{Deserialize, Serialize};

// --- Tags ---

/// A scope/tag pair attached to a manager resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tag {
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub tag: String,
}

impl Tag {
    pub fn new(scope: &str, tag: &str) -> Self {
        Self {
            scope: scope.to_string(),
            tag: tag.to_string(),
        }
    }
}

// --- Address bindings ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddressBinding {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,
}

// --- Logical port ---

/// A virtual network attachment point bound to a workload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogicalPort {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub admin_state: String,
    #[serde(default)]
    pub logical_switch_id: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub address_bindings: Vec<AddressBinding>,
}

impl LogicalPort {
    /// True if any tag carries exactly this scope and value.
    pub fn has_tag(&self, scope: &str, value: &str) -> bool {
        self.tags.iter().any(|t| t.scope == scope && t.tag == value)
    }

    /// The binding used to address packets to or from this port.
    pub fn primary_binding(&self) -> Option<&AddressBinding> {
        self.address_bindings.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListResult;

    #[test]
    fn decodes_manager_port_listing() {
        let body = r#"{
            "result_count": 1,
            "results": [{
                "id": "lp-1",
                "display_name": "web-0",
                "admin_state": "UP",
                "logical_switch_id": "ls-9",
                "tags": [
                    {"scope": "ncp/pod", "tag": "web-0"},
                    {"scope": "ncp/project", "tag": "shop"}
                ],
                "address_bindings": [
                    {"ip_address": "10.0.0.5", "mac_address": "02:50:56:00:00:01", "vlan": 0}
                ]
            }]
        }"#;

        let list: ListResult<LogicalPort> = serde_json::from_str(body).unwrap();
        assert_eq!(list.result_count, Some(1));
        let port = &list.results[0];
        assert!(port.has_tag("ncp/pod", "web-0"));
        assert!(port.has_tag("ncp/project", "shop"));
        assert!(!port.has_tag("ncp/pod", "shop"));
        let binding = port.primary_binding().unwrap();
        assert_eq!(binding.ip_address, "10.0.0.5");
        assert_eq!(binding.mac_address, "02:50:56:00:00:01");
    }

    #[test]
    fn missing_collections_decode_empty() {
        let port: LogicalPort = serde_json::from_str(r#"{"id": "lp-2"}"#).unwrap();
        assert!(port.tags.is_empty());
        assert!(port.primary_binding().is_none());
    }
}
