//! Domain core for the task service.
//!
//! # Overview
//! Holds the `Task` entity and its title rule, the `TaskRepository` port
//! with an in-memory implementation, the `TaskService` usecase layer, and a
//! stateless client for the third-party task list. Nothing here knows about
//! HTTP routing or SQL.
//!
//! # Design
//! - `TaskService` takes an `Arc<dyn TaskRepository>` so the storage variant
//!   is picked once by the caller and never branched on afterwards.
//! - Domain errors are a tagged enum (`TaskError`); callers match on the
//!   variant instead of comparing error values.
//! - The external client follows a build/parse split so the caller owns the
//!   network round-trip and its timeout.

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod repository;
pub mod types;
pub mod usecase;

pub use client::{ExternalTask, ExternalTasksClient, DEFAULT_EXTERNAL_TASKS_URL};
pub use error::{BoxError, ExternalError, RepositoryError, TaskError};
pub use http::{HttpRequest, HttpResponse};
pub use memory::MemoryTaskRepository;
pub use repository::{RepositoryResult, TaskRepository};
pub use types::{normalize_title, Task, TaskId, MAX_TITLE_CHARS};
pub use usecase::{TaskService, DEFAULT_DEADLINE};
