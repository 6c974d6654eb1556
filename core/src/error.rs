//! Error types for storage, business rules, and the third-party task list.
//!
//! # Design
//! Storage speaks `RepositoryError`; the usecase layer speaks `TaskError`.
//! The `From<RepositoryError>` impl below is the only place a storage
//! not-found turns into the domain not-found, so callers above the usecase
//! layer never need to know which repository produced an error.

use std::time::Duration;

use thiserror::Error;

/// Boxed error coming out of a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `TaskRepository` implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the given id.
    #[error("no task matched the given id")]
    NotFound,

    /// The backend failed for reasons unrelated to the request.
    #[error("storage backend failed: {0}")]
    Backend(#[source] BoxError),
}

impl RepositoryError {
    pub fn backend(err: impl Into<BoxError>) -> Self {
        RepositoryError::Backend(err.into())
    }
}

/// Errors returned by `TaskService`.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,

    #[error("invalid title")]
    InvalidTitle,

    /// The repository did not answer before the deadline.
    #[error("storage call exceeded {0:?}")]
    DeadlineExceeded(Duration),

    /// Any other storage failure, passed through untouched.
    #[error(transparent)]
    Storage(RepositoryError),
}

impl From<RepositoryError> for TaskError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => TaskError::NotFound,
            other => TaskError::Storage(other),
        }
    }
}

/// Errors returned while fetching the third-party task list.
#[derive(Debug, Error)]
pub enum ExternalError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The upstream body was not a JSON array of objects.
    #[error("decoding upstream body failed: {0}")]
    Decode(String),
}
