//! Persistence port for tasks.
//!
//! # Design
//! `TaskRepository` is object safe so the storage variant can be chosen once
//! at startup and handed to `TaskService` as `Arc<dyn TaskRepository>`. Every
//! implementation must order unfiltered and filtered lists by ascending id
//! and report a missing id as `RepositoryError::NotFound`.

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::types::{Task, TaskId};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks ordered by id, optionally keeping only those whose `done`
    /// equals `done`.
    async fn list(&self, done: Option<bool>) -> RepositoryResult<Vec<Task>>;

    async fn get_by_id(&self, id: TaskId) -> RepositoryResult<Task>;

    /// Persist a new task with an already validated title. Returns the task
    /// as stored, including its assigned id.
    async fn create(&self, title: &str) -> RepositoryResult<Task>;

    async fn update_done(&self, id: TaskId, done: bool) -> RepositoryResult<()>;

    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;
}
