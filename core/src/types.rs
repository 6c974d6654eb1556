//! Domain types for the task service.
//!
//! # Design
//! `Task` is the only entity that outlives a request. Its title rule lives
//! here as a free function so both the usecase layer and tests can reach it
//! without going through a repository. Wire DTOs for requests and responses
//! belong to the server crate; only the entity itself is shared.

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Identifier assigned to a task at creation. Never reused.
pub type TaskId = i64;

/// Longest accepted title, counted in characters after trimming.
pub const MAX_TITLE_CHARS: usize = 100;

/// A single persisted task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    /// A freshly created task: `done` always starts out `false`.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}

/// Trim surrounding whitespace and enforce the 1..=100 character bound.
pub fn normalize_title(raw: &str) -> Result<String, TaskError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(TaskError::InvalidTitle);
    }
    Ok(trimmed.to_string())
}
