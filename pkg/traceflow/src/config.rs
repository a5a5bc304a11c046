use pkg_constants::env::{NSX_MANAGER, NSX_PASS};
use pkg_nsx::config::non_empty;
use pkg_nsx::{ConfigError, Connection, ConnectionArgs};

use crate::lookup::EndpointRef;

/// Traceflow flags as given on the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct TraceflowArgs {
    pub connection: ConnectionArgs,
    pub namespace: Option<String>,
    pub src_pod: Option<String>,
    pub src_port: Option<String>,
    pub dst_pod: Option<String>,
    pub dst_port: Option<String>,
    pub dst_namespace: Option<String>,
    pub payload: Option<String>,
}

/// Validated traceflow configuration, built once and passed to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceflowConfig {
    pub connection: Connection,
    pub src: EndpointRef,
    pub dst: EndpointRef,
    pub src_port: u16,
    pub dst_port: u16,
    pub payload: String,
}

impl TraceflowArgs {
    /// Merge flags with the environment. Performs no I/O beyond `env`.
    ///
    /// Every absent mandatory field is reported in one error.
    pub fn resolve<F>(self, env: &F) -> Result<TraceflowConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let connection = self.connection.resolve(env, &mut missing);
        let namespace = require(self.namespace, "namespace", &mut missing);
        let src_pod = require(self.src_pod, "src-pod", &mut missing);
        let src_port = require(self.src_port, "src-port", &mut missing);
        let dst_pod = require(self.dst_pod, "dst-pod", &mut missing);
        let dst_port = require(self.dst_port, "dst-port", &mut missing);

        let (
            Some(connection),
            Some(namespace),
            Some(src_pod),
            Some(src_port),
            Some(dst_pod),
            Some(dst_port),
        ) = (connection, namespace, src_pod, src_port, dst_pod, dst_port)
        else {
            return Err(ConfigError::MissingRequiredFields(missing));
        };

        let dst_namespace = non_empty(self.dst_namespace).unwrap_or_else(|| namespace.clone());

        Ok(TraceflowConfig {
            connection,
            src: EndpointRef {
                pod: src_pod,
                namespace,
            },
            dst: EndpointRef {
                pod: dst_pod,
                namespace: dst_namespace,
            },
            src_port: parse_port("src-port", &src_port)?,
            dst_port: parse_port("dst-port", &dst_port)?,
            payload: self.payload.unwrap_or_default(),
        })
    }
}

fn require(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = non_empty(value);
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn parse_port(field: &'static str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| ConfigError::InvalidPort {
            field,
            value: value.to_string(),
        })
}

/// Usage summary printed when the configuration is incomplete.
pub fn usage() -> String {
    format!(
        "Required:\n\
         \t--nsx-ip     Or set {NSX_MANAGER} env variable\n\
         \t--nsx-pass   Or set {NSX_PASS} env variable\n\
         \t--namespace\n\
         \t--src-pod\n\
         \t--src-port\n\
         \t--dst-pod\n\
         \t--dst-port\n\
         \n\
         Optional:\n\
         \t--nsx-user        If other than admin (or set NSX_USER)\n\
         \t--dst-namespace   If destination namespace is different than source\n\
         \t--payload         Optional text payload\n"
    )
}
