use pkg_constants::api::{NCP_POD_SCOPE, NCP_PROJECT_SCOPE};
use pkg_nsx::{ApiError, TraceflowApi};
use pkg_types::logical_port::LogicalPort;
use tracing::debug;

/// A workload identified by pod name and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRef {
    pub pod: String,
    pub namespace: String,
}

impl std::fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.pod)
    }
}

/// First port, in the given order, tagged with both the pod and the namespace.
/// When several ports match, the first one wins.
pub fn find_port<'a>(ports: &'a [LogicalPort], endpoint: &EndpointRef) -> Option<&'a LogicalPort> {
    ports.iter().find(|lp| {
        lp.has_tag(NCP_POD_SCOPE, &endpoint.pod) && lp.has_tag(NCP_PROJECT_SCOPE, &endpoint.namespace)
    })
}

/// Fetch every logical port and pick the one bound to `endpoint`.
pub async fn lookup_endpoint(
    api: &dyn TraceflowApi,
    endpoint: &EndpointRef,
) -> Result<Option<LogicalPort>, ApiError> {
    let ports = api.list_logical_ports().await?;
    debug!("Scanning {} logical ports for {}", ports.len(), endpoint);
    Ok(find_port(&ports, endpoint).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::logical_port::Tag;

    fn port(id: &str, tags: &[(&str, &str)]) -> LogicalPort {
        LogicalPort {
            id: id.to_string(),
            tags: tags.iter().map(|(s, t)| Tag::new(s, t)).collect(),
            ..Default::default()
        }
    }

    fn endpoint(pod: &str, namespace: &str) -> EndpointRef {
        EndpointRef {
            pod: pod.to_string(),
            namespace: namespace.to_string(),
        }
    }

    #[test]
    fn matches_pod_and_namespace() {
        let ports = vec![
            port("lp-1", &[("ncp/pod", "web-0"), ("ncp/project", "other")]),
            port("lp-2", &[("ncp/pod", "db-0"), ("ncp/project", "shop")]),
            port("lp-3", &[("ncp/project", "shop"), ("ncp/pod", "web-0")]),
        ];
        let found = find_port(&ports, &endpoint("web-0", "shop")).unwrap();
        assert_eq!(found.id, "lp-3");
    }

    #[test]
    fn no_match_without_both_tags() {
        let ports = vec![
            port("lp-1", &[("ncp/pod", "web-0")]),
            port("lp-2", &[("ncp/project", "shop")]),
            port("lp-3", &[("ncp/cluster", "web-0"), ("ncp/project", "shop")]),
        ];
        assert!(find_port(&ports, &endpoint("web-0", "shop")).is_none());
        assert!(find_port(&[], &endpoint("web-0", "shop")).is_none());
    }

    #[test]
    fn first_match_wins() {
        let ports = vec![
            port("lp-a", &[("ncp/pod", "web-0"), ("ncp/project", "shop")]),
            port("lp-b", &[("ncp/pod", "web-0"), ("ncp/project", "shop")]),
        ];
        assert_eq!(find_port(&ports, &endpoint("web-0", "shop")).unwrap().id, "lp-a");
    }
}
