//! Build-status events for the reporting backend
//!
//! Lifecycle points of one build are mirrored to an external reporting
//! backend as structured events, independent of the progress narration.
//! A started event is always emitted before any terminal event for the
//! same build reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use crate::error::ReportError;
use crate::schema::{BuildRef, BuildStatus, CommitIdentity};

/// Provider tag carried on every event.
pub const PROVIDER: &str = "jenkins";

/// Event type tag carried on every event.
pub const EVENT_TYPE: &str = "push";

/// One build-status event as delivered to the reporting backend.
///
/// Exactly one of `started_at` / `finished_at` is populated, depending on
/// whether the status is `started` or terminal; the other field is absent
/// on the wire, not null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildStatusEvent {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Human-readable build label, `Build #<number>`.
    pub name: String,

    /// Build number.
    pub number: u64,

    /// Fixed event type tag.
    #[serde(rename = "type")]
    pub kind: String,

    /// Absolute build URL.
    pub url: String,

    /// Lifecycle status of the build.
    pub status: BuildStatus,

    /// Commit sha that triggered the build.
    pub commit: String,

    /// Branch the commit was pushed to.
    pub branch: String,

    /// Fixed provider tag.
    pub provider: String,

    /// Populated on the started event only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Populated on terminal events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl BuildStatusEvent {
    fn base(status: BuildStatus, commit: &CommitIdentity, build: &BuildRef) -> Self {
        BuildStatusEvent {
            owner: commit.owner.clone(),
            repo: commit.repo.clone(),
            name: format!("Build #{}", build.number),
            number: build.number,
            kind: EVENT_TYPE.to_string(),
            url: build.url.clone(),
            status,
            commit: commit.sha.clone(),
            branch: commit.branch.clone(),
            provider: PROVIDER.to_string(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Build a started event, stamped with the current time.
    pub fn started(commit: &CommitIdentity, build: &BuildRef) -> Self {
        let mut event = Self::base(BuildStatus::Started, commit, build);
        event.started_at = Some(Utc::now());
        event
    }

    /// Build a terminal event, stamped with the current time.
    pub fn finished(status: BuildStatus, commit: &CommitIdentity, build: &BuildRef) -> Self {
        debug_assert!(status.is_terminal());
        let mut event = Self::base(status, commit, build);
        event.finished_at = Some(Utc::now());
        event
    }
}

/// Build-status reporting backend collaborator.
///
/// Delivery is best-effort: callers log failures and never let them change
/// the goal outcome.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    /// Deliver one event, scoped to the workspace identity.
    async fn report(
        &self,
        workspace_id: &str,
        event: &BuildStatusEvent,
    ) -> std::result::Result<(), ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit() -> CommitIdentity {
        CommitIdentity {
            owner: "acme".to_string(),
            repo: "app".to_string(),
            sha: "deadbeef".to_string(),
            branch: "main".to_string(),
        }
    }

    fn build() -> BuildRef {
        BuildRef {
            number: 7,
            url: "https://jenkins.example.com/job/app/7/".to_string(),
        }
    }

    #[test]
    fn test_started_event_timestamps() {
        let event = BuildStatusEvent::started(&commit(), &build());
        assert_eq!(event.status, BuildStatus::Started);
        assert!(event.started_at.is_some());
        assert!(event.finished_at.is_none());
    }

    #[test]
    fn test_finished_event_timestamps() {
        let event = BuildStatusEvent::finished(BuildStatus::Passed, &commit(), &build());
        assert!(event.started_at.is_none());
        assert!(event.finished_at.is_some());
    }

    #[test]
    fn test_event_fixed_tags_and_label() {
        let event = BuildStatusEvent::started(&commit(), &build());
        assert_eq!(event.name, "Build #7");
        assert_eq!(event.kind, "push");
        assert_eq!(event.provider, "jenkins");
    }

    #[test]
    fn test_absent_timestamp_is_omitted_on_the_wire() {
        let event = BuildStatusEvent::started(&commit(), &build());
        let json = serde_json::to_value(&event).expect("serialize");

        assert!(json.get("started_at").is_some());
        assert!(json.get("finished_at").is_none());
        assert_eq!(json["type"], "push");
        assert_eq!(json["status"], "started");
    }

    #[test]
    fn test_finished_at_is_rfc3339() {
        let event = BuildStatusEvent::finished(BuildStatus::Failed, &commit(), &build());
        let json = serde_json::to_value(&event).expect("serialize");
        let stamp = json["finished_at"].as_str().expect("finished_at string");
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
