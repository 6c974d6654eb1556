//! HTTP server for the task service.
//!
//! # Overview
//! Wires `tasks_core::TaskService` into an axum router behind a middleware
//! chain (request logging, then correlation ids, then the API-key check for
//! private paths). Storage is chosen once at startup and handed in through
//! `AppState`.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use tokio::{net::TcpListener, sync::Notify};

use tasks_core::TaskService;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod postgres;
pub mod routes;
pub mod storage;

pub use config::{Config, ConfigError, StorageMode};
pub use error::{ApiError, ServerError};
pub use external::ExternalTasks;
pub use routes::app;

/// Everything a handler needs, cloned per request.
#[derive(Clone)]
pub struct AppState {
    tasks: TaskService,
    external: ExternalTasks,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(tasks: TaskService, external: ExternalTasks, api_key: &str) -> Self {
        Self {
            tasks,
            external,
            api_key: Arc::from(api_key),
        }
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn external(&self) -> &ExternalTasks {
        &self.external
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Serve until `shutdown` resolves, then stop accepting connections and give
/// in-flight requests up to `grace` to finish before returning anyway.
pub async fn run<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
    grace: Duration,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stopping = Arc::new(Notify::new());
    let trigger = Arc::clone(&stopping);

    let server = axum::serve(listener, app(state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("shutdown requested, draining connections");
            trigger.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => {
            tracing::info!("server stopped");
            result
        }
        () = async {
            stopping.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(?grace, "grace period expired, dropping remaining connections");
            Ok(())
        }
    }
}
