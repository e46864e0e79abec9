//! Trigger submission and queue-to-build correlation
//!
//! The server separates "accepted for scheduling" from "actually running";
//! a build number exists only at the latter point. This module bridges that
//! asynchrony into one synchronous result: submit the trigger, then poll
//! the queue item at a fixed interval until it exposes the assigned
//! executable build. The loop itself is unbounded; the executor imposes a
//! deadline when one is configured.

use std::collections::HashMap;
use std::time::Duration;

use jenkins_goal_domain::{BuildRef, JobServer, Progress, TriggerAck};
use tracing::{debug, info};

use crate::error::GoalResult;

/// Submit a build request and resolve it to the assigned executable build.
///
/// Returns `None` when the server declines to queue the request (e.g. a
/// duplicate of an already-running build); the execution is then treated as
/// successfully triggered but unobservable.
pub async fn trigger_and_correlate(
    server: &dyn JobServer,
    job: &str,
    parameters: Option<&HashMap<String, String>>,
    progress: &Progress,
    poll_interval: Duration,
) -> GoalResult<Option<BuildRef>> {
    progress.phase(&format!("Starting Jenkins job '{}'", job));

    let id = match server.trigger_build(job, parameters).await? {
        TriggerAck::Queued(id) => id,
        TriggerAck::Declined => {
            info!(job = %job, "trigger not queued; build is unobservable");
            progress.phase(&format!(
                "Jenkins job '{}' was triggered but not queued; not awaiting a build",
                job
            ));
            return Ok(None);
        }
    };
    debug!(job = %job, queue_id = %id, "build request queued");

    let build = loop {
        if let Some(build) = server.queued_build(id).await? {
            break build;
        }
        tokio::time::sleep(poll_interval).await;
    };

    info!(job = %job, number = build.number, url = %build.url, "queue item resolved to build");
    progress.phase(&format!(
        "Jenkins job '{}' started build #{}",
        job, build.number
    ));
    Ok(Some(build))
}
