//! Wire types of the NSX manager REST API consumed by the tools.

pub mod list;
pub mod loadbalancer;
pub mod logical_port;
pub mod nat;
pub mod pool;
pub mod traceflow;
