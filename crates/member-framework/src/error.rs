//! # Framework Errors
//!
//! Two layers of errors flow through the framework. [`StoreError`] is what a
//! fetcher or writer reports about the remote system. [`ResourceError`] is what
//! an adapter operation reports to the orchestrating host, and wraps the
//! former.

use std::time::Duration;

/// Errors reported by a remote object fetcher or writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No object with the requested id exists remotely.
    #[error("Object not found: {0}")]
    NotFound(String),
    /// Transport or protocol failure. Not retried by the framework.
    #[error("Transient remote failure: {0}")]
    Transient(String),
    /// The remote system rejected the payload.
    #[error("Remote rejected request: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Errors surfaced by a member resource operation.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("{kind} with id {parent_id} does not exist")]
    ParentNotFound {
        kind: &'static str,
        parent_id: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Timed out after {waited:?} waiting for lock on {key}")]
    Timeout { key: String, waited: Duration },
    #[error("Invalid import id {0:?}, expecting the following format: <parent_id>/<value>")]
    InvalidImportId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
