//! Remote job server contract
//!
//! The goal pack never speaks the Jenkins wire protocol itself; it drives a
//! [`JobServer`] implementation supplied by the host. The trait names the
//! capabilities the execution routine relies on: existence check, create,
//! update, trigger, queue lookup, terminal detail fetch, and a live log
//! stream. In-memory fakes are provided for testing via the `fakes` module.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ServerError;
use crate::schema::{BuildDetail, BuildRef, QueueId, TriggerAck};

/// Result type for job server operations
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// One event on a build's live log stream.
///
/// Errors are events, not termination: the stream keeps delivering after an
/// `Error` item, and only the end of the stream itself signals completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A chunk of log text, forwarded verbatim in arrival order.
    Chunk(String),

    /// A transport-level error, surfaced as diagnostic text.
    Error(String),
}

/// A live log stream for one build. Stream end is the completion signal.
pub type LogStream = BoxStream<'static, LogEvent>;

/// Remote job server collaborator.
///
/// Guarantees expected of implementations:
/// - `trigger_build` answers immediately with a queue acknowledgment; it
///   never blocks until the build is scheduled.
/// - `queued_build` returns `None` until the queue item is assigned an
///   executable build, then the same [`BuildRef`] on every later call.
/// - `log_stream` delivers events in server order and terminates once the
///   server closes the stream.
#[async_trait]
pub trait JobServer: Send + Sync {
    /// Whether a job with this name exists on the server.
    async fn job_exists(&self, job: &str) -> ServerResult<bool>;

    /// Create a job with the given definition document.
    async fn create_job(&self, job: &str, definition: &str) -> ServerResult<()>;

    /// Overwrite an existing job's definition document.
    async fn update_job(&self, job: &str, definition: &str) -> ServerResult<()>;

    /// Submit a build request, optionally with parameters.
    async fn trigger_build(
        &self,
        job: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> ServerResult<TriggerAck>;

    /// Look up the executable build assigned to a queue item, if any yet.
    async fn queued_build(&self, id: QueueId) -> ServerResult<Option<BuildRef>>;

    /// Fetch the terminal detail record of a build.
    async fn build_detail(&self, job: &str, number: u64) -> ServerResult<BuildDetail>;

    /// Open the live log stream of a running build.
    async fn log_stream(&self, job: &str, number: u64) -> ServerResult<LogStream>;
}
