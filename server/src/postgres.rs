//! PostgreSQL task storage.
//!
//! Each operation is a single parameterized statement, so the database is
//! the only serialization point. Expected schema:
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id    BIGSERIAL PRIMARY KEY,
//!     title TEXT      NOT NULL,
//!     done  BOOLEAN   NOT NULL DEFAULT FALSE
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use tasks_core::{RepositoryError, RepositoryResult, Task, TaskId, TaskRepository};

#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    done: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            done: row.done,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and check that the server answers.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn backend(err: sqlx::Error) -> RepositoryError {
    RepositoryError::backend(err)
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self, done: Option<bool>) -> RepositoryResult<Vec<Task>> {
        let rows = match done {
            None => {
                sqlx::query_as::<_, TaskRow>("SELECT id, title, done FROM tasks ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
            }
            Some(done) => {
                sqlx::query_as::<_, TaskRow>(
                    "SELECT id, title, done FROM tasks WHERE done = $1 ORDER BY id",
                )
                .bind(done)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(backend)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        sqlx::query_as::<_, TaskRow>("SELECT id, title, done FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .map(Task::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, title: &str) -> RepositoryResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(
            "INSERT INTO tasks (title) VALUES ($1) RETURNING id, title, done",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.into())
    }

    async fn update_done(&self, id: TaskId, done: bool) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE tasks SET done = $1 WHERE id = $2")
            .bind(done)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
