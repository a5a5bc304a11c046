use std::time::Duration;

use pkg_constants::traceflow::POLL_INTERVAL_MS;
use pkg_nsx::TraceflowApi;
use pkg_types::traceflow::{OperationState, TraceJob};
use tracing::{debug, info};

use crate::error::TraceflowError;

/// How the poller waits for a job to leave `IN_PROGRESS`.
#[derive(Debug, Clone)]
pub struct PollOptions {
    pub interval: Duration,
    /// Local bound on status fetches. `None` trusts the manager-side timeout.
    pub max_polls: Option<u32>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            max_polls: None,
        }
    }
}

/// Re-fetch `job` until the manager reports a terminal state.
///
/// `on_tick` runs once per wait, before the sleep, with the number of status
/// fetches issued so far. Each fetch replaces the snapshot wholesale.
pub async fn wait_for_completion(
    api: &dyn TraceflowApi,
    mut job: TraceJob,
    opts: &PollOptions,
    on_tick: &mut dyn FnMut(u32),
) -> Result<TraceJob, TraceflowError> {
    let mut polls = 0u32;
    while job.operation_state.is_in_progress() {
        if opts.max_polls.is_some_and(|max| polls >= max) {
            return Err(TraceflowError::PollLimitExceeded { id: job.id, polls });
        }
        on_tick(polls);
        tokio::time::sleep(opts.interval).await;

        job = api.get_traceflow(&job.id).await?;
        polls += 1;
        debug!("Traceflow {} poll #{}: {}", job.id, polls, job.operation_state);
    }

    if job.operation_state != OperationState::Finished {
        return Err(TraceflowError::NotFinished {
            id: job.id,
            state: job.operation_state,
        });
    }
    info!("Traceflow {} finished after {} status checks", job.id, polls);
    Ok(job)
}

/// Attach the observations of a finished job. Call once, after
/// [`wait_for_completion`] succeeded.
pub async fn fetch_observations(
    api: &dyn TraceflowApi,
    job: &mut TraceJob,
) -> Result<(), TraceflowError> {
    let observations = api.list_observations(&job.id).await?;
    debug!("Traceflow {} has {} observations", job.id, observations.len());
    job.observations.extend(observations);
    Ok(())
}
