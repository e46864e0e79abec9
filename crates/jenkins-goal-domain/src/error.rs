//! Error types for collaborator contracts

use thiserror::Error;

/// Errors returned by a remote job server collaborator.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("job '{job}' not found on the server")]
    JobNotFound { job: String },

    #[error("build #{number} of job '{job}' not found on the server")]
    BuildNotFound { job: String, number: u64 },

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("malformed server response: {0}")]
    Protocol(String),
}

/// Errors returned by a build-status reporting backend.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("webhook delivery failed: {0}")]
    Delivery(String),

    #[error("reporting backend rejected the event with status {status}")]
    Rejected { status: u16 },
}
