//! Build lifecycle vocabulary shared across the goal pack
//!
//! These types track one Jenkins build from trigger acknowledgment through
//! queue correlation to its terminal result, and carry the mapping from the
//! server's result vocabulary onto the orchestrator's goal vocabulary.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Queue correlation
// ---------------------------------------------------------------------------

/// Identifier of a build request accepted into the server's queue but not
/// yet assigned to a running executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueId(pub u64);

impl std::fmt::Display for QueueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immediate acknowledgment of a trigger request.
///
/// `Declined` covers the server answering without a usable queue id, e.g.
/// when the job is already running and a duplicate submission is refused.
/// A declined trigger is not an error: the execution reports generic
/// "triggered" success and skips log streaming and outcome mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAck {
    /// The build request was queued under this id.
    Queued(QueueId),

    /// The server did not queue the request.
    Declined,
}

/// The concrete, numbered build a queue item resolved to.
///
/// Immutable once correlated; the unit of correlation for log streaming,
/// terminal status, and status reporting. At most one is produced per goal
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    /// Build number assigned by the server.
    pub number: u64,

    /// Absolute URL of the build on the server.
    pub url: String,
}

// ---------------------------------------------------------------------------
// Terminal result
// ---------------------------------------------------------------------------

/// Terminal detail record of a finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDetail {
    /// Raw result code as reported by the server (`SUCCESS`, `ABORTED`,
    /// `FAILURE`, ...). Absent if the server has not recorded one.
    pub result: Option<String>,

    /// Absolute URL of the build's result page.
    pub url: String,
}

/// Parsed server result vocabulary. The match is case-sensitive; anything
/// outside the three known codes is preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Aborted,
    Failure,
    Other(Option<String>),
}

impl BuildResult {
    /// Parse the raw result code of a [`BuildDetail`].
    pub fn parse(code: Option<&str>) -> Self {
        match code {
            Some("SUCCESS") => BuildResult::Success,
            Some("ABORTED") => BuildResult::Aborted,
            Some("FAILURE") => BuildResult::Failure,
            other => BuildResult::Other(other.map(str::to_string)),
        }
    }

    /// The status reported to the status backend for this result.
    ///
    /// Unrecognized codes map to [`BuildStatus::Errored`] rather than
    /// defaulting to success.
    pub fn status(&self) -> BuildStatus {
        match self {
            BuildResult::Success => BuildStatus::Passed,
            BuildResult::Aborted => BuildStatus::Canceled,
            BuildResult::Failure => BuildStatus::Failed,
            BuildResult::Other(_) => BuildStatus::Errored,
        }
    }

    /// The goal state the orchestrator sees for this result.
    pub fn goal_state(&self) -> GoalState {
        match self {
            BuildResult::Success => GoalState::Success,
            BuildResult::Aborted => GoalState::Stopped,
            BuildResult::Failure | BuildResult::Other(_) => GoalState::Failure,
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting and goal vocabulary
// ---------------------------------------------------------------------------

/// Build status vocabulary used in reported status events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Started,
    Passed,
    Failed,
    Canceled,
    #[serde(rename = "error")]
    Errored,
}

impl BuildStatus {
    /// Whether this status closes the build lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BuildStatus::Started)
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuildStatus::Started => "started",
            BuildStatus::Passed => "passed",
            BuildStatus::Failed => "failed",
            BuildStatus::Canceled => "canceled",
            BuildStatus::Errored => "error",
        };
        write!(f, "{}", s)
    }
}

/// Terminal state of a goal execution in the orchestrator's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalState {
    Success,
    Failure,
    Stopped,
}

/// A labeled link attached to a goal result (e.g. the build log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrl {
    pub label: String,
    pub url: String,
}

impl ExternalUrl {
    /// The conventional "Log" link pointing at a build's result page.
    pub fn log(url: impl Into<String>) -> Self {
        ExternalUrl {
            label: "Log".to_string(),
            url: url.into(),
        }
    }
}

/// What a goal execution hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteGoalResult {
    /// Terminal goal state.
    pub state: GoalState,

    /// Human-readable one-line description of the outcome.
    pub description: String,

    /// Links attached to the goal (empty when no build was observed).
    pub external_urls: Vec<ExternalUrl>,
}

// ---------------------------------------------------------------------------
// Commit identity
// ---------------------------------------------------------------------------

/// Identity of the commit that triggered the goal execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Commit sha.
    pub sha: String,

    /// Branch the commit was pushed to.
    pub branch: String,
}
