//! NSX manager REST API constants.

/// Path prefix of the NSX manager API, appended to the manager origin.
pub const API_PREFIX: &str = "/api/v1";

/// Scheme used when the manager address is given as a bare host.
pub const DEFAULT_SCHEME: &str = "https://";

// ─── Resources ────────────────────────────────────────────────────────────

/// Collection of every logical port known to the manager.
pub const LOGICAL_PORTS_PATH: &str = "/logical-ports/";

/// Traceflow jobs. Individual jobs live at `TRACEFLOWS_PATH/{id}`.
pub const TRACEFLOWS_PATH: &str = "/traceflows";

/// IP pools. Allocations live at `IP_POOLS_PATH/{pool}/allocations`.
pub const IP_POOLS_PATH: &str = "/pools/ip-pools";

/// Load balancer services.
pub const LB_SERVICES_PATH: &str = "/loadbalancer/services";

/// Load balancer virtual servers.
pub const LB_VIRTUAL_SERVERS_PATH: &str = "/loadbalancer/virtual-servers";

/// Logical routers. NAT rules live at `LOGICAL_ROUTERS_PATH/{router}/nat/rules`.
pub const LOGICAL_ROUTERS_PATH: &str = "/logical-routers";

/// Query action that returns an allocation to its pool.
pub const RELEASE_ACTION: &str = "RELEASE";

// ─── NCP tags ─────────────────────────────────────────────────────────────

/// Tag scope NCP uses to record the pod name on a logical port.
pub const NCP_POD_SCOPE: &str = "ncp/pod";

/// Tag scope NCP uses to record the namespace (project) on a logical port.
pub const NCP_PROJECT_SCOPE: &str = "ncp/project";
