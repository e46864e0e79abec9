//! Domain model and collaborator contracts for the Jenkins goal pack
//!
//! This crate carries the vocabulary and the seams; the execution routine
//! lives in `jenkins-goal`.
//!
//! ## Key Components
//!
//! - [`JobServer`]: the remote job server contract (existence check,
//!   create/update, trigger, queue lookup, detail fetch, live log stream)
//! - [`StatusReporter`] + [`BuildStatusEvent`]: build-status reporting
//! - [`ProgressSink`] + [`Progress`]: phase-framed progress narration
//! - Build lifecycle schema: [`TriggerAck`], [`QueueId`], [`BuildRef`],
//!   [`BuildResult`], [`BuildStatus`], [`GoalState`]
//!
//! In-memory fakes for every contract are provided via the `fakes` module.

mod error;
mod events;
pub mod fakes;
mod progress;
mod schema;
mod server;

pub use error::{ReportError, ServerError};
pub use events::{BuildStatusEvent, StatusReporter, EVENT_TYPE, PROVIDER};
pub use progress::{Progress, ProgressSink, PHASE_CLOSE, PHASE_OPEN};
pub use schema::{
    BuildDetail, BuildRef, BuildResult, BuildStatus, CommitIdentity, ExecuteGoalResult,
    ExternalUrl, GoalState, QueueId, TriggerAck,
};
pub use server::{JobServer, LogEvent, LogStream, ServerResult};
