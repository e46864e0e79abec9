//! Error types for goal execution

use jenkins_goal_domain::ServerError;
use thiserror::Error;

/// The wait that exceeded the configured timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    /// Polling the queue for the assigned executable build.
    QueueCorrelation,

    /// Waiting for the log stream's end-of-stream signal.
    LogStream,
}

impl std::fmt::Display for WaitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WaitPhase::QueueCorrelation => "queue correlation",
            WaitPhase::LogStream => "log stream",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum GoalError {
    #[error("no Jenkins server url configured for this goal")]
    MissingServerUrl,

    #[error("invalid Jenkins server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("resolving {field} from registration failed: {source}")]
    Resolve {
        field: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("{phase} did not complete within the configured wait timeout")]
    TimedOut { phase: WaitPhase },
}

/// Result type for goal execution operations
pub type GoalResult<T> = std::result::Result<T, GoalError>;
