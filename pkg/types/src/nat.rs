use serde::{Deserialize, Serialize};

/// A NAT rule on a logical router.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NatRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub translated_network: Option<String>,
}
