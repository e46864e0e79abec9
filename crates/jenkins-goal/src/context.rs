//! Per-execution invocation context

use std::sync::Arc;

use jenkins_goal_domain::{CommitIdentity, Progress, ProgressSink};

use crate::config::ProcessConfig;

/// Read-only view of one goal execution, supplied by the orchestrator.
#[derive(Clone)]
pub struct GoalInvocation {
    /// The commit that triggered the execution.
    pub commit: CommitIdentity,

    /// Workspace/team identity the execution is scoped to.
    pub workspace_id: String,

    /// Destination for execution narration.
    pub progress: Arc<dyn ProgressSink>,

    /// Process-wide configuration.
    pub config: ProcessConfig,
}

impl GoalInvocation {
    pub fn new(
        commit: CommitIdentity,
        workspace_id: impl Into<String>,
        progress: Arc<dyn ProgressSink>,
        config: ProcessConfig,
    ) -> Self {
        GoalInvocation {
            commit,
            workspace_id: workspace_id.into(),
            progress,
            config,
        }
    }

    /// Phase-framing handle over this invocation's progress sink.
    pub fn progress(&self) -> Progress {
        Progress::new(self.progress.clone())
    }
}

impl std::fmt::Debug for GoalInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalInvocation")
            .field("commit", &self.commit)
            .field("workspace_id", &self.workspace_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
