//! Terminal outcome mapping
//!
//! After the log stream ends, the build's terminal detail record is fetched
//! and its result code mapped onto the reporting status and the goal state.
//! An unrecognized code never maps to success: it is surfaced as an errored
//! status and a failed goal, with the raw code preserved.

use jenkins_goal_domain::{BuildRef, BuildResult, BuildStatus, GoalState, JobServer, Progress};
use tracing::{info, warn};

use crate::error::GoalResult;

/// The mapped terminal outcome of one observed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Status reported to the status backend.
    pub status: BuildStatus,

    /// Goal state handed to the orchestrator.
    pub state: GoalState,

    /// URL of the build's result page.
    pub url: String,
}

/// Fetch the terminal detail record and map it.
pub async fn map_outcome(
    server: &dyn JobServer,
    job: &str,
    build: &BuildRef,
    progress: &Progress,
) -> GoalResult<Outcome> {
    let detail = server.build_detail(job, build.number).await?;
    let result = BuildResult::parse(detail.result.as_deref());

    if let BuildResult::Other(code) = &result {
        warn!(
            job = %job,
            number = build.number,
            code = %code.as_deref().unwrap_or("<none>"),
            "unrecognized terminal result code"
        );
        progress.phase(&format!(
            "Jenkins job '{}' completed with unrecognized result {}",
            job,
            code.as_deref().unwrap_or("<none>")
        ));
    } else {
        progress.phase(&format!(
            "Jenkins job '{}' completed with status {}",
            job,
            result.status()
        ));
    }

    let outcome = Outcome {
        status: result.status(),
        state: result.goal_state(),
        url: detail.url,
    };
    info!(
        job = %job,
        number = build.number,
        status = %outcome.status,
        "build outcome mapped"
    );
    Ok(outcome)
}
