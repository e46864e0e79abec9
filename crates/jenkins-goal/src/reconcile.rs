//! Job definition reconciliation
//!
//! Idempotent create-or-update: whatever definition currently exists on the
//! server is overwritten without an optimistic-concurrency check. Remote
//! errors are fatal for the execution; retry policy belongs to the host
//! orchestrator's goal-retry facility.

use jenkins_goal_domain::{JobServer, Progress};
use tracing::info;

use crate::error::GoalResult;

/// Ensure the job exists with the desired definition. No-op when the
/// registration does not manage the definition.
pub async fn reconcile(
    server: &dyn JobServer,
    job: &str,
    definition: Option<&str>,
    progress: &Progress,
) -> GoalResult<()> {
    let Some(definition) = definition else {
        return Ok(());
    };

    if server.job_exists(job).await? {
        server.update_job(job, definition).await?;
        info!(job = %job, "updated job definition");
        progress.phase(&format!("Updated Jenkins job '{}'", job));
    } else {
        server.create_job(job, definition).await?;
        info!(job = %job, "created job");
        progress.phase(&format!("Created Jenkins job '{}'", job));
    }
    Ok(())
}
