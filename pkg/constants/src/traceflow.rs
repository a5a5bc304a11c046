//! Traceflow packet and polling constants.

/// Manager-side traceflow timeout. The unit is defined by the manager.
pub const TRACE_TIMEOUT: u32 = 5000;

/// Packet resource kind for header-described packets.
pub const PACKET_RESOURCE_TYPE: &str = "FieldsPacketData";

/// Transport type of the injected packet.
pub const TRANSPORT_UNICAST: &str = "UNICAST";

/// TCP flags of the injected packet (SYN).
pub const TCP_FLAG_SYN: u8 = 2;

/// IP protocol number for TCP.
pub const IP_PROTO_TCP: u8 = 6;

/// TTL of the injected packet.
pub const DEFAULT_TTL: u8 = 64;

/// EtherType for IPv4.
pub const ETH_TYPE_IPV4: u16 = 2048;

/// Default source port when `--src-port` is not given.
pub const DEFAULT_SRC_PORT: &str = "8080";

/// Interval between two status fetches, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Observation reason for a packet dropped by a firewall rule.
pub const REASON_FW_RULE: &str = "FW_RULE";
