//! Jenkins goal for a delivery orchestrator
//!
//! Runs a Jenkins build as one goal of a delivery pipeline:
//! - Reconciles the job definition (create or update)
//! - Triggers a build and correlates the queue item to the running build
//! - Streams the live log to the invocation's progress sink
//! - Maps the terminal result onto the orchestrator's goal vocabulary
//! - Mirrors started/terminal status events to a reporting webhook
//!
//! The Jenkins wire protocol is not part of this crate; the host supplies a
//! `JobServer` implementation through a [`ServerConnector`]. Collaborator
//! contracts and in-memory fakes live in `jenkins-goal-domain`.

pub mod config;
pub mod context;
pub mod correlate;
pub mod error;
pub mod execute;
pub mod fakes;
pub mod outcome;
pub mod reconcile;
pub mod registration;
pub mod report;
pub mod resolve;
pub mod stream;

// Re-export key types
pub use config::{ProcessConfig, ServerConfig, ServerConnector, ServerDefaults, ServerEndpoint};
pub use context::GoalInvocation;
pub use error::{GoalError, GoalResult, WaitPhase};
pub use execute::{ExecuteOptions, JenkinsGoal};
pub use outcome::Outcome;
pub use registration::{Registration, Resolvable, ResolverFn};
pub use report::{NoopStatusReporter, WebhookStatusReporter};
