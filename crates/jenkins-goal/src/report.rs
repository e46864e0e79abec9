//! Webhook delivery of build-status events
//!
//! Events are POSTed to the reporting backend, scoped by workspace
//! identity. Delivery is best-effort: the executor logs failures and never
//! lets them change the goal outcome.

use async_trait::async_trait;

use jenkins_goal_domain::{BuildStatusEvent, ReportError, StatusReporter};

/// Status reporter POSTing events to a webhook endpoint.
pub struct WebhookStatusReporter {
    client: reqwest::Client,
    base_url: String,
}

impl WebhookStatusReporter {
    /// Reporter targeting the given webhook base URL; events for a
    /// workspace go to `<base_url>/<workspace_id>`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jenkins-goal/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        WebhookStatusReporter {
            client,
            base_url: base_url.into(),
        }
    }

    /// Reporter configured from `BUILD_WEBHOOK_URL`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var("BUILD_WEBHOOK_URL").ok().map(Self::new)
    }

    fn endpoint_for(&self, workspace_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), workspace_id)
    }
}

#[async_trait]
impl StatusReporter for WebhookStatusReporter {
    async fn report(
        &self,
        workspace_id: &str,
        event: &BuildStatusEvent,
    ) -> std::result::Result<(), ReportError> {
        let response = self
            .client
            .post(self.endpoint_for(workspace_id))
            .json(event)
            .send()
            .await
            .map_err(|e| ReportError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ReportError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Status reporter that drops every event. For hosts without a reporting
/// backend.
#[derive(Debug, Default)]
pub struct NoopStatusReporter;

#[async_trait]
impl StatusReporter for NoopStatusReporter {
    async fn report(
        &self,
        _workspace_id: &str,
        _event: &BuildStatusEvent,
    ) -> std::result::Result<(), ReportError> {
        Ok(())
    }
}
