//! The goal execution routine
//!
//! One invocation runs the whole lifecycle in order: endpoint validation,
//! resolution, definition reconciliation, trigger and queue correlation,
//! started status report, log streaming, outcome mapping, terminal status
//! report. A terminal status is never reported without a preceding started
//! status for the same build reference, including on the error paths.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use jenkins_goal_domain::{
    BuildRef, BuildStatus, BuildStatusEvent, ExecuteGoalResult, ExternalUrl, GoalState, JobServer,
    Progress, StatusReporter,
};

use crate::config::{ServerConnector, ServerEndpoint};
use crate::context::GoalInvocation;
use crate::error::{GoalError, GoalResult, WaitPhase};
use crate::outcome::Outcome;
use crate::registration::Registration;
use crate::{correlate, outcome, reconcile, resolve, stream};

/// Tunables of one goal instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Fixed delay between queue polls.
    pub poll_interval: Duration,

    /// Optional bound on the queue-correlation and log-stream waits.
    /// Unbounded when absent.
    pub wait_timeout: Option<Duration>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        ExecuteOptions {
            poll_interval: Duration::from_millis(500),
            wait_timeout: None,
        }
    }
}

impl ExecuteOptions {
    /// Set the queue poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bound the queue-correlation and log-stream waits.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }
}

/// One registered Jenkins goal, executable once per invocation.
pub struct JenkinsGoal {
    registration: Registration,
    connector: Arc<dyn ServerConnector>,
    reporter: Arc<dyn StatusReporter>,
    options: ExecuteOptions,
}

impl JenkinsGoal {
    pub fn new(
        registration: Registration,
        connector: Arc<dyn ServerConnector>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        JenkinsGoal {
            registration,
            connector,
            reporter,
            options: ExecuteOptions::default(),
        }
    }

    /// Override the default execution options.
    pub fn with_options(mut self, options: ExecuteOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the goal for one invocation.
    pub async fn execute(&self, invocation: &GoalInvocation) -> GoalResult<ExecuteGoalResult> {
        let execution = Uuid::new_v4();
        let progress = invocation.progress();

        let endpoint =
            ServerEndpoint::merged(self.registration.server.as_ref(), &invocation.config.jenkins)?;
        let server = self.connector.connect(&endpoint).await?;

        let job = resolve::job_name(&self.registration, invocation).await?;
        info!(execution = %execution, job = %job, url = %endpoint.url, "executing Jenkins goal");

        let definition = resolve::definition(&self.registration, invocation).await?;
        reconcile::reconcile(server.as_ref(), &job, definition.as_deref(), &progress).await?;

        if self.registration.converge_only {
            info!(execution = %execution, job = %job, "converge-only goal done");
            return Ok(success(format!("Jenkins `{}` converged", job)));
        }

        let parameters = resolve::parameters(&self.registration, invocation).await?;
        let build = self
            .bounded(
                WaitPhase::QueueCorrelation,
                correlate::trigger_and_correlate(
                    server.as_ref(),
                    &job,
                    parameters.as_ref(),
                    &progress,
                    self.options.poll_interval,
                ),
            )
            .await?;

        let Some(build) = build else {
            return Ok(success(format!("Jenkins `{}` triggered", job)));
        };

        self.report(invocation, BuildStatusEvent::started(&invocation.commit, &build))
            .await;

        let outcome = match self.observe(server.as_ref(), &job, &build, &progress).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // Keep the started-before-terminal invariant on failure.
                self.report(
                    invocation,
                    BuildStatusEvent::finished(BuildStatus::Errored, &invocation.commit, &build),
                )
                .await;
                return Err(err);
            }
        };

        self.report(
            invocation,
            BuildStatusEvent::finished(outcome.status, &invocation.commit, &build),
        )
        .await;

        info!(
            execution = %execution,
            job = %job,
            number = build.number,
            status = %outcome.status,
            "Jenkins goal finished"
        );
        Ok(ExecuteGoalResult {
            state: outcome.state,
            description: format!("Jenkins `{}` {}", job, outcome.status),
            external_urls: vec![ExternalUrl::log(outcome.url)],
        })
    }

    /// Stream the build to completion, then map its terminal outcome.
    async fn observe(
        &self,
        server: &dyn JobServer,
        job: &str,
        build: &BuildRef,
        progress: &Progress,
    ) -> GoalResult<Outcome> {
        let log = server.log_stream(job, build.number).await?;
        self.bounded(WaitPhase::LogStream, async {
            stream::stream_to_completion(log, progress).await;
            Ok(())
        })
        .await?;
        outcome::map_outcome(server, job, build, progress).await
    }

    /// Deliver one status event, best-effort.
    async fn report(&self, invocation: &GoalInvocation, event: BuildStatusEvent) {
        if let Err(err) = self.reporter.report(&invocation.workspace_id, &event).await {
            warn!(
                workspace = %invocation.workspace_id,
                status = %event.status,
                error = %err,
                "build status report failed"
            );
        }
    }

    /// Apply the configured wait timeout to one suspension point.
    async fn bounded<T>(
        &self,
        phase: WaitPhase,
        fut: impl Future<Output = GoalResult<T>>,
    ) -> GoalResult<T> {
        match self.options.wait_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(GoalError::TimedOut { phase }),
            },
            None => fut.await,
        }
    }
}

fn success(description: String) -> ExecuteGoalResult {
    ExecuteGoalResult {
        state: GoalState::Success,
        description,
        external_urls: Vec::new(),
    }
}
