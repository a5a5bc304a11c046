//! Traceflow pipeline: resolve both endpoints, inject a TCP SYN between them,
//! wait for the manager's simulation and interpret its observations.

pub mod config;
pub mod error;
pub mod lookup;
pub mod packet;
pub mod poll;
pub mod report;

#[cfg(test)]
mod testing;

use pkg_nsx::TraceflowApi;
use pkg_types::logical_port::LogicalPort;
use pkg_types::traceflow::TraceJob;
use tracing::info;

pub use config::{TraceflowArgs, TraceflowConfig, usage};
pub use error::TraceflowError;
pub use lookup::EndpointRef;
pub use poll::PollOptions;
pub use report::{Report, Verdict};

/// A finished traceflow and its interpretation.
#[derive(Debug)]
pub struct Outcome {
    pub job: TraceJob,
    pub report: Report,
}

async fn resolve(
    api: &dyn TraceflowApi,
    endpoint: &EndpointRef,
) -> Result<LogicalPort, TraceflowError> {
    let port = lookup::lookup_endpoint(api, endpoint).await?.ok_or_else(|| {
        TraceflowError::EndpointNotFound {
            pod: endpoint.pod.clone(),
            namespace: endpoint.namespace.clone(),
        }
    })?;
    info!("Resolved {} to logical port {}", endpoint, port.id);
    Ok(port)
}

/// Run the whole pipeline. The first error aborts the run.
pub async fn run(
    api: &dyn TraceflowApi,
    cfg: &TraceflowConfig,
    opts: &PollOptions,
    on_tick: &mut dyn FnMut(u32),
) -> Result<Outcome, TraceflowError> {
    let src = resolve(api, &cfg.src).await?;
    let dst = resolve(api, &cfg.dst).await?;

    let request = packet::build_request(cfg, &src, &dst)?;
    let job = packet::submit(api, &request).await?;

    let mut job = poll::wait_for_completion(api, job, opts, on_tick).await?;
    poll::fetch_observations(api, &mut job).await?;

    let report = report::evaluate(&job.observations);
    info!("Traceflow {} verdict: {}", job.id, report.verdict);
    Ok(Outcome { job, report })
}
