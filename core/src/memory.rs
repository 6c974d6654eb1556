//! Ephemeral task storage.
//!
//! A `BTreeMap` keyed by id keeps list output in ascending id order. The map
//! and the id counter sit behind one lock so that assign-and-increment,
//! read-then-write and check-then-delete each happen atomically.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::repository::{RepositoryResult, TaskRepository};
use crate::types::{Task, TaskId};

#[derive(Debug)]
struct Store {
    tasks: BTreeMap<TaskId, Task>,
    next_id: TaskId,
}

/// In-process repository. Contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryTaskRepository {
    store: RwLock<Store>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn list(&self, done: Option<bool>) -> RepositoryResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|task| done.map_or(true, |done| task.done == done))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        let store = self.store.read().await;
        store.tasks.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, title: &str) -> RepositoryResult<Task> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;
        let task = Task::new(id, title);
        store.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_done(&self, id: TaskId, done: bool) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let task = store.tasks.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        task.done = done;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        store
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
