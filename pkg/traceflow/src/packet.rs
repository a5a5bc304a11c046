use pkg_constants::traceflow::{
    DEFAULT_TTL, ETH_TYPE_IPV4, IP_PROTO_TCP, PACKET_RESOURCE_TYPE, TCP_FLAG_SYN, TRACE_TIMEOUT,
    TRANSPORT_UNICAST,
};
use pkg_nsx::TraceflowApi;
use pkg_types::logical_port::{AddressBinding, LogicalPort};
use pkg_types::traceflow::{
    EthHeader, FieldsPacket, IpHeader, TcpHeader, TraceJob, TraceflowRequest, TransportHeader,
};
use tracing::info;

use crate::config::TraceflowConfig;
use crate::error::TraceflowError;
use crate::lookup::EndpointRef;

fn binding<'a>(
    port: &'a LogicalPort,
    endpoint: &EndpointRef,
) -> Result<&'a AddressBinding, TraceflowError> {
    port.primary_binding()
        .ok_or_else(|| TraceflowError::NoAddressBinding {
            pod: endpoint.pod.clone(),
            port_id: port.id.clone(),
        })
}

/// Describe a TCP SYN from `src` to `dst`, injected on the source port.
pub fn build_request(
    cfg: &TraceflowConfig,
    src: &LogicalPort,
    dst: &LogicalPort,
) -> Result<TraceflowRequest, TraceflowError> {
    let src_binding = binding(src, &cfg.src)?;
    let dst_binding = binding(dst, &cfg.dst)?;

    Ok(TraceflowRequest {
        timeout: TRACE_TIMEOUT,
        lport_id: src.id.clone(),
        packet: FieldsPacket {
            resource_type: PACKET_RESOURCE_TYPE.to_string(),
            routed: false,
            transport_type: TRANSPORT_UNICAST.to_string(),
            payload: cfg.payload.clone(),
            ip_header: IpHeader {
                src_ip: src_binding.ip_address.clone(),
                dst_ip: dst_binding.ip_address.clone(),
                protocol: IP_PROTO_TCP,
                ttl: DEFAULT_TTL,
                flags: 0,
            },
            eth_header: EthHeader {
                src_mac: src_binding.mac_address.clone(),
                dst_mac: dst_binding.mac_address.clone(),
                eth_type: ETH_TYPE_IPV4,
            },
            transport_header: TransportHeader {
                tcp_header: TcpHeader {
                    src_port: cfg.src_port,
                    dst_port: cfg.dst_port,
                    tcp_flags: TCP_FLAG_SYN,
                },
            },
        },
    })
}

/// Create the traceflow job. No retry.
pub async fn submit(
    api: &dyn TraceflowApi,
    request: &TraceflowRequest,
) -> Result<TraceJob, TraceflowError> {
    let job = api.create_traceflow(request).await?;
    info!(
        "Traceflow {} created ({} -> {}), state {}",
        job.id, request.packet.ip_header.src_ip, request.packet.ip_header.dst_ip, job.operation_state
    );
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_nsx::Connection;

    fn cfg(payload: &str) -> TraceflowConfig {
        TraceflowConfig {
            connection: Connection {
                manager: "nsx".to_string(),
                user: "admin".to_string(),
                password: "pw".to_string(),
            },
            src: EndpointRef {
                pod: "web-0".to_string(),
                namespace: "shop".to_string(),
            },
            dst: EndpointRef {
                pod: "db-0".to_string(),
                namespace: "shop".to_string(),
            },
            src_port: 40000,
            dst_port: 5432,
            payload: payload.to_string(),
        }
    }

    fn port(id: &str, ip: &str, mac: &str) -> LogicalPort {
        LogicalPort {
            id: id.to_string(),
            address_bindings: vec![AddressBinding {
                ip_address: ip.to_string(),
                mac_address: mac.to_string(),
                vlan: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn builds_syn_between_bindings() {
        let src = port("lp-src", "10.0.0.1", "02:00:00:00:00:01");
        let dst = port("lp-dst", "10.0.0.2", "02:00:00:00:00:02");
        let req = build_request(&cfg("hello"), &src, &dst).unwrap();

        assert_eq!(req.timeout, 5000);
        assert_eq!(req.lport_id, "lp-src");
        assert_eq!(req.packet.resource_type, "FieldsPacketData");
        assert!(!req.packet.routed);
        assert_eq!(req.packet.transport_type, "UNICAST");
        assert_eq!(req.packet.payload, "hello");
        assert_eq!(req.packet.ip_header.src_ip, "10.0.0.1");
        assert_eq!(req.packet.ip_header.dst_ip, "10.0.0.2");
        assert_eq!(req.packet.ip_header.protocol, 6);
        assert_eq!(req.packet.ip_header.ttl, 64);
        assert_eq!(req.packet.eth_header.src_mac, "02:00:00:00:00:01");
        assert_eq!(req.packet.eth_header.dst_mac, "02:00:00:00:00:02");
        assert_eq!(req.packet.eth_header.eth_type, 2048);
        assert_eq!(req.packet.transport_header.tcp_header.src_port, 40000);
        assert_eq!(req.packet.transport_header.tcp_header.dst_port, 5432);
        assert_eq!(req.packet.transport_header.tcp_header.tcp_flags, 2);
    }

    #[test]
    fn unbound_port_is_fatal() {
        let src = port("lp-src", "10.0.0.1", "aa");
        let dst = LogicalPort {
            id: "lp-dst".to_string(),
            ..Default::default()
        };
        let err = build_request(&cfg(""), &src, &dst).unwrap_err();
        match err {
            TraceflowError::NoAddressBinding { pod, port_id } => {
                assert_eq!(pod, "db-0");
                assert_eq!(port_id, "lp-dst");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
