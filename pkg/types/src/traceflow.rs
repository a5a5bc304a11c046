use serde::{Deserialize, Serialize};

// --- Packet description ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub tcp_flags: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportHeader {
    pub tcp_header: TcpHeader,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IpHeader {
    pub src_ip: String,
    pub dst_ip: String,
    pub protocol: u8,
    pub ttl: u8,
    pub flags: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EthHeader {
    pub src_mac: String,
    pub dst_mac: String,
    pub eth_type: u16,
}

/// A packet described field by field rather than as raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldsPacket {
    pub resource_type: String,
    pub routed: bool,
    pub transport_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payload: String,
    pub ip_header: IpHeader,
    pub eth_header: EthHeader,
    pub transport_header: TransportHeader,
}

/// Body of `POST /traceflows`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceflowRequest {
    pub timeout: u32,
    /// Logical port the packet is injected on.
    pub lport_id: String,
    pub packet: FieldsPacket,
}

// --- Job state ---

/// Lifecycle state of a traceflow job as reported by the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationState {
    InProgress,
    Finished,
    Failed,
    /// Any state this client does not know about, kept verbatim.
    Unknown(String),
}

impl OperationState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, OperationState::InProgress)
    }
}

impl Default for OperationState {
    fn default() -> Self {
        OperationState::Unknown(String::new())
    }
}

impl From<String> for OperationState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "IN_PROGRESS" => OperationState::InProgress,
            "FINISHED" => OperationState::Finished,
            "FAILED" => OperationState::Failed,
            _ => OperationState::Unknown(s),
        }
    }
}

impl From<OperationState> for String {
    fn from(state: OperationState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for OperationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationState::InProgress => write!(f, "IN_PROGRESS"),
            OperationState::Finished => write!(f, "FINISHED"),
            OperationState::Failed => write!(f, "FAILED"),
            OperationState::Unknown(s) => write!(f, "{}", s),
        }
    }
}

// --- Job and observations ---

/// One simulated checkpoint recorded while the packet travelled.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Observation {
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub sequence_no: Option<u32>,
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub component_name: String,
    /// Firewall rule that matched, only set on firewall observations.
    #[serde(default)]
    pub acl_rule_id: Option<u64>,
    #[serde(default)]
    pub lport_id: String,
    #[serde(default)]
    pub lport_name: String,
    #[serde(default)]
    pub reason: String,
}

/// A traceflow job snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceJob {
    pub id: String,
    #[serde(default)]
    pub operation_state: OperationState,
    /// Filled from the observations endpoint once the job has finished.
    #[serde(skip)]
    pub observations: Vec<Observation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_state_from_wire() {
        let job: TraceJob =
            serde_json::from_str(r#"{"id": "tf-1", "operation_state": "IN_PROGRESS"}"#).unwrap();
        assert!(job.operation_state.is_in_progress());

        let job: TraceJob =
            serde_json::from_str(r#"{"id": "tf-1", "operation_state": "FINISHED"}"#).unwrap();
        assert_eq!(job.operation_state, OperationState::Finished);

        let job: TraceJob =
            serde_json::from_str(r#"{"id": "tf-1", "operation_state": "TIMED_OUT"}"#).unwrap();
        assert_eq!(
            job.operation_state,
            OperationState::Unknown("TIMED_OUT".to_string())
        );
        assert_eq!(job.operation_state.to_string(), "TIMED_OUT");
    }

    #[test]
    fn missing_state_is_not_in_progress() {
        let job: TraceJob = serde_json::from_str(r#"{"id": "tf-1"}"#).unwrap();
        assert!(!job.operation_state.is_in_progress());
        assert!(job.observations.is_empty());
    }

    #[test]
    fn request_uses_manager_field_names() {
        let req = TraceflowRequest {
            timeout: 5000,
            lport_id: "lp-src".to_string(),
            packet: FieldsPacket {
                resource_type: "FieldsPacketData".to_string(),
                routed: false,
                transport_type: "UNICAST".to_string(),
                payload: String::new(),
                ip_header: IpHeader {
                    src_ip: "10.0.0.1".to_string(),
                    dst_ip: "10.0.0.2".to_string(),
                    protocol: 6,
                    ttl: 64,
                    flags: 0,
                },
                eth_header: EthHeader {
                    src_mac: "aa".to_string(),
                    dst_mac: "bb".to_string(),
                    eth_type: 2048,
                },
                transport_header: TransportHeader {
                    tcp_header: TcpHeader {
                        src_port: 8080,
                        dst_port: 80,
                        tcp_flags: 2,
                    },
                },
            },
        };

        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["timeout"], 5000);
        assert_eq!(v["lport_id"], "lp-src");
        assert_eq!(v["packet"]["resource_type"], "FieldsPacketData");
        assert_eq!(v["packet"]["routed"], false);
        assert!(v["packet"].get("payload").is_none());
        assert_eq!(v["packet"]["ip_header"]["dst_ip"], "10.0.0.2");
        assert_eq!(v["packet"]["eth_header"]["eth_type"], 2048);
        assert_eq!(
            v["packet"]["transport_header"]["tcp_header"]["tcp_flags"],
            2
        );
    }

    #[test]
    fn observation_without_rule() {
        let obs: Observation = serde_json::from_str(
            r#"{"resource_type": "TraceflowObservationDelivered", "component_type": "LR", "reason": "UNKNOWN"}"#,
        )
        .unwrap();
        assert_eq!(obs.acl_rule_id, None);
        assert_eq!(obs.component_type, "LR");
    }
}
