//! In-memory fakes for collaborator contracts (testing only)
//!
//! Provides `FakeJobServer`, `MemoryProgressSink`, and
//! `RecordingStatusReporter` that satisfy the trait contracts without any
//! remote server. `FakeJobServer` is scripted: tests decide the trigger
//! acknowledgment, the sequence of queue-poll answers, the log events, and
//! the terminal detail record, and can inspect every call made against it.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::error::{ReportError, ServerError};
use crate::events::{BuildStatusEvent, StatusReporter};
use crate::progress::ProgressSink;
use crate::schema::{BuildDetail, BuildRef, QueueId, TriggerAck};
use crate::server::{JobServer, LogEvent, LogStream, ServerResult};

// ---------------------------------------------------------------------------
// MemoryProgressSink
// ---------------------------------------------------------------------------

/// Progress sink that collects every line in memory.
#[derive(Debug, Default)]
pub struct MemoryProgressSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines received so far, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressSink for MemoryProgressSink {
    fn line(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

// ---------------------------------------------------------------------------
// RecordingStatusReporter
// ---------------------------------------------------------------------------

/// Status reporter that records every event instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingStatusReporter {
    recorded: Mutex<Vec<(String, BuildStatusEvent)>>,
    failing: bool,
}

impl RecordingStatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that records each event and then reports delivery failure.
    pub fn failing() -> Self {
        RecordingStatusReporter {
            recorded: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// All `(workspace_id, event)` pairs received so far, in order.
    pub fn recorded(&self) -> Vec<(String, BuildStatusEvent)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusReporter for RecordingStatusReporter {
    async fn report(
        &self,
        workspace_id: &str,
        event: &BuildStatusEvent,
    ) -> std::result::Result<(), ReportError> {
        self.recorded
            .lock()
            .unwrap()
            .push((workspace_id.to_string(), event.clone()));
        if self.failing {
            return Err(ReportError::Delivery("recording reporter set to fail".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakeJobServer
// ---------------------------------------------------------------------------

/// One recorded call against a [`FakeJobServer`].
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Exists(String),
    Create(String),
    Update(String),
    Trigger {
        job: String,
        parameters: Option<HashMap<String, String>>,
    },
    Poll(QueueId),
    Detail {
        job: String,
        number: u64,
    },
    Stream {
        job: String,
        number: u64,
    },
}

/// Scripted in-memory job server.
pub struct FakeJobServer {
    exists: bool,
    ack: TriggerAck,
    polls: Mutex<VecDeque<Option<BuildRef>>>,
    log: Vec<LogEvent>,
    endless_log: bool,
    detail: Option<BuildDetail>,
    fail_detail: bool,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeJobServer {
    pub fn new() -> Self {
        FakeJobServer {
            exists: false,
            ack: TriggerAck::Queued(QueueId(1)),
            polls: Mutex::new(VecDeque::new()),
            log: Vec::new(),
            endless_log: false,
            detail: None,
            fail_detail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report the job as already existing on the server.
    pub fn with_existing_job(mut self) -> Self {
        self.exists = true;
        self
    }

    /// Script the trigger acknowledgment.
    pub fn with_ack(mut self, ack: TriggerAck) -> Self {
        self.ack = ack;
        self
    }

    /// Script the queue-poll answers, consumed one per poll. Once the
    /// script is exhausted every further poll answers `None`.
    pub fn with_queue_polls(mut self, polls: Vec<Option<BuildRef>>) -> Self {
        self.polls = Mutex::new(polls.into());
        self
    }

    /// Script the log events delivered before the stream ends.
    pub fn with_log(mut self, events: Vec<LogEvent>) -> Self {
        self.log = events;
        self
    }

    /// Make the log stream deliver nothing and never end.
    pub fn with_endless_log(mut self) -> Self {
        self.endless_log = true;
        self
    }

    /// Script the terminal detail record.
    pub fn with_result(mut self, code: &str, url: &str) -> Self {
        self.detail = Some(BuildDetail {
            result: Some(code.to_string()),
            url: url.to_string(),
        });
        self
    }

    /// Script a detail record without a result code.
    pub fn with_missing_result(mut self, url: &str) -> Self {
        self.detail = Some(BuildDetail {
            result: None,
            url: url.to_string(),
        });
        self
    }

    /// Make every detail fetch fail with a remote error.
    pub fn with_failing_detail(mut self) -> Self {
        self.fail_detail = true;
        self
    }

    /// Every call made against this server, in order.
    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of queue polls issued so far.
    pub fn poll_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FakeCall::Poll(_)))
            .count()
    }

    /// Number of trigger submissions issued so far.
    pub fn trigger_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FakeCall::Trigger { .. }))
            .count()
    }

    fn record(&self, call: FakeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeJobServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobServer for FakeJobServer {
    async fn job_exists(&self, job: &str) -> ServerResult<bool> {
        self.record(FakeCall::Exists(job.to_string()));
        Ok(self.exists)
    }

    async fn create_job(&self, job: &str, _definition: &str) -> ServerResult<()> {
        self.record(FakeCall::Create(job.to_string()));
        Ok(())
    }

    async fn update_job(&self, job: &str, _definition: &str) -> ServerResult<()> {
        self.record(FakeCall::Update(job.to_string()));
        Ok(())
    }

    async fn trigger_build(
        &self,
        job: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> ServerResult<TriggerAck> {
        self.record(FakeCall::Trigger {
            job: job.to_string(),
            parameters: parameters.cloned(),
        });
        Ok(self.ack)
    }

    async fn queued_build(&self, id: QueueId) -> ServerResult<Option<BuildRef>> {
        self.record(FakeCall::Poll(id));
        Ok(self.polls.lock().unwrap().pop_front().flatten())
    }

    async fn build_detail(&self, job: &str, number: u64) -> ServerResult<BuildDetail> {
        self.record(FakeCall::Detail {
            job: job.to_string(),
            number,
        });
        if self.fail_detail {
            return Err(ServerError::Remote("detail fetch failed".to_string()));
        }
        self.detail
            .clone()
            .ok_or_else(|| ServerError::BuildNotFound {
                job: job.to_string(),
                number,
            })
    }

    async fn log_stream(&self, job: &str, number: u64) -> ServerResult<LogStream> {
        self.record(FakeCall::Stream {
            job: job.to_string(),
            number,
        });
        if self.endless_log {
            return Ok(stream::pending().boxed());
        }
        Ok(stream::iter(self.log.clone()).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_server_scripted_polls() {
        let build = BuildRef {
            number: 7,
            url: "https://jenkins.example.com/job/app/7/".to_string(),
        };
        let server = FakeJobServer::new().with_queue_polls(vec![None, Some(build.clone())]);

        assert_eq!(server.queued_build(QueueId(42)).await.unwrap(), None);
        assert_eq!(server.queued_build(QueueId(42)).await.unwrap(), Some(build));
        // script exhausted
        assert_eq!(server.queued_build(QueueId(42)).await.unwrap(), None);
        assert_eq!(server.poll_count(), 3);
    }

    #[tokio::test]
    async fn test_fake_server_records_trigger_parameters() {
        let server = FakeJobServer::new();
        let mut parameters = HashMap::new();
        parameters.insert("BRANCH".to_string(), "main".to_string());

        server.trigger_build("app", Some(&parameters)).await.unwrap();

        match &server.calls()[0] {
            FakeCall::Trigger { job, parameters } => {
                assert_eq!(job, "app");
                assert_eq!(
                    parameters.as_ref().unwrap().get("BRANCH"),
                    Some(&"main".to_string())
                );
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fake_server_log_stream_ends() {
        let server = FakeJobServer::new().with_log(vec![
            LogEvent::Chunk("first".to_string()),
            LogEvent::Chunk("second".to_string()),
        ]);

        let mut stream = server.log_stream("app", 7).await.unwrap();
        assert_eq!(stream.next().await, Some(LogEvent::Chunk("first".to_string())));
        assert_eq!(stream.next().await, Some(LogEvent::Chunk("second".to_string())));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_recording_reporter_keeps_order() {
        let reporter = RecordingStatusReporter::new();
        let commit = crate::schema::CommitIdentity {
            owner: "acme".to_string(),
            repo: "app".to_string(),
            sha: "deadbeef".to_string(),
            branch: "main".to_string(),
        };
        let build = BuildRef {
            number: 7,
            url: "https://jenkins.example.com/job/app/7/".to_string(),
        };

        reporter
            .report("W1", &BuildStatusEvent::started(&commit, &build))
            .await
            .unwrap();

        let recorded = reporter.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "W1");
    }
}
