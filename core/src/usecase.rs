//! Business rules for tasks.
//!
//! # Design
//! `TaskService` owns the title rule and the deadline on storage calls.
//! Everything else is a pass-through to the injected repository; the
//! `From<RepositoryError>` conversion turns storage not-found into
//! `TaskError::NotFound` and leaves every other failure opaque.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{RepositoryError, TaskError};
use crate::repository::TaskRepository;
use crate::types::{normalize_title, Task, TaskId};

/// Deadline applied to a repository call when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    deadline: Duration,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            repository,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub async fn list(&self, done: Option<bool>) -> Result<Vec<Task>, TaskError> {
        self.bounded(self.repository.list(done)).await
    }

    pub async fn get_by_id(&self, id: TaskId) -> Result<Task, TaskError> {
        self.bounded(self.repository.get_by_id(id)).await
    }

    pub async fn create(&self, title: &str) -> Result<Task, TaskError> {
        let title = normalize_title(title)?;
        let task = self.bounded(self.repository.create(&title)).await?;
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    pub async fn update_done(&self, id: TaskId, done: bool) -> Result<(), TaskError> {
        self.bounded(self.repository.update_done(id, done)).await
    }

    pub async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        self.bounded(self.repository.delete(id)).await
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, TaskError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result.map_err(TaskError::from),
            Err(_) => Err(TaskError::DeadlineExceeded(self.deadline)),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::memory::MemoryTaskRepository;
    use crate::repository::RepositoryResult;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskRepository::new()))
    }

    /// Answers every call with a backend failure.
    struct BrokenRepository;

    #[async_trait]
    impl TaskRepository for BrokenRepository {
        async fn list(&self, _done: Option<bool>) -> RepositoryResult<Vec<Task>> {
            Err(RepositoryError::backend("connection refused"))
        }
        async fn get_by_id(&self, _id: TaskId) -> RepositoryResult<Task> {
            Err(RepositoryError::backend("connection refused"))
        }
        async fn create(&self, _title: &str) -> RepositoryResult<Task> {
            Err(RepositoryError::backend("connection refused"))
        }
        async fn update_done(&self, _id: TaskId, _done: bool) -> RepositoryResult<()> {
            Err(RepositoryError::backend("connection refused"))
        }
        async fn delete(&self, _id: TaskId) -> RepositoryResult<()> {
            Err(RepositoryError::backend("connection refused"))
        }
    }

    /// Never answers.
    struct StalledRepository;

    #[async_trait]
    impl TaskRepository for StalledRepository {
        async fn list(&self, _done: Option<bool>) -> RepositoryResult<Vec<Task>> {
            std::future::pending().await
        }
        async fn get_by_id(&self, _id: TaskId) -> RepositoryResult<Task> {
            std::future::pending().await
        }
        async fn create(&self, _title: &str) -> RepositoryResult<Task> {
            std::future::pending().await
        }
        async fn update_done(&self, _id: TaskId, _done: bool) -> RepositoryResult<()> {
            std::future::pending().await
        }
        async fn delete(&self, _id: TaskId) -> RepositoryResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_trimmed_title() {
        let service = service();
        let created = service.create("  buy milk  ").await.unwrap();
        assert_eq!(created, Task { id: 1, title: "buy milk".into(), done: false });
        assert_eq!(service.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_title_without_touching_storage() {
        let service = TaskService::new(Arc::new(BrokenRepository));
        assert!(matches!(service.create("   ").await, Err(TaskError::InvalidTitle)));
        let long = "x".repeat(101);
        assert!(matches!(service.create(&long).await, Err(TaskError::InvalidTitle)));
    }

    #[tokio::test]
    async fn missing_task_maps_to_not_found() {
        let service = service();
        assert!(matches!(service.get_by_id(42).await, Err(TaskError::NotFound)));
        assert!(matches!(service.update_done(42, true).await, Err(TaskError::NotFound)));
        assert!(matches!(service.delete(42).await, Err(TaskError::NotFound)));
    }

    #[tokio::test]
    async fn update_done_sets_exact_value() {
        let service = service();
        let task = service.create("toggle me").await.unwrap();
        for value in [true, true, false, true] {
            service.update_done(task.id, value).await.unwrap();
            let fetched = service.get_by_id(task.id).await.unwrap();
            assert_eq!(fetched.done, value);
            assert_eq!(fetched.title, "toggle me");
            assert_eq!(fetched.id, task.id);
        }
    }

    #[tokio::test]
    async fn list_passes_filter_through() {
        let service = service();
        let a = service.create("a").await.unwrap();
        service.create("b").await.unwrap();
        service.update_done(a.id, true).await.unwrap();

        let done = service.list(Some(true)).await.unwrap();
        assert_eq!(done, vec![Task { id: a.id, title: "a".into(), done: true }]);
        assert_eq!(service.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn backend_errors_surface_as_storage() {
        let service = TaskService::new(Arc::new(BrokenRepository));
        assert!(matches!(service.list(None).await, Err(TaskError::Storage(_))));
        assert!(matches!(service.get_by_id(1).await, Err(TaskError::Storage(_))));
        assert!(matches!(service.create("ok").await, Err(TaskError::Storage(_))));
        assert!(matches!(service.update_done(1, true).await, Err(TaskError::Storage(_))));
        assert!(matches!(service.delete(1).await, Err(TaskError::Storage(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_storage_hits_the_deadline() {
        let deadline = Duration::from_millis(250);
        let service = TaskService::new(Arc::new(StalledRepository)).with_deadline(deadline);
        match service.get_by_id(1).await {
            Err(TaskError::DeadlineExceeded(d)) => assert_eq!(d, deadline),
            other => panic!("unexpected {other:?}"),
        }
    }
}
