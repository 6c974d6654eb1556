//! Error rendering for HTTP responses, plus startup failures.
//!
//! # Design
//! Every failure a handler can produce ends up as an `ApiError`, which
//! renders as `{"error": "<message>"}` with a JSON content type. Internal
//! causes are logged here and never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use tasks_core::{ExternalError, TaskError};

use crate::config::ConfigError;

pub const INTERNAL_ERROR: &str = "internal error";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with a short description of what was wrong with the request.
    BadRequest(&'static str),
    Unauthorized,
    NotFound,
    /// 500 with a message that is safe to show to clients.
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(message) | ApiError::Internal(message) => *message,
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound => "task not found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound => ApiError::NotFound,
            TaskError::InvalidTitle => ApiError::BadRequest("invalid title"),
            other => {
                tracing::error!(error = %other, "task operation failed");
                ApiError::Internal(INTERNAL_ERROR)
            }
        }
    }
}

impl From<ExternalError> for ApiError {
    fn from(err: ExternalError) -> Self {
        tracing::error!(error = %err, "external task fetch failed");
        match err {
            ExternalError::Decode(_) => ApiError::Internal("failed to parse external tasks"),
            ExternalError::Transport(_) | ExternalError::Status { .. } => {
                ApiError::Internal("failed to fetch external tasks")
            }
        }
    }
}

/// Failures that stop the process from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use tasks_core::RepositoryError;

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, String, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_renders_message() {
        let (status, content_type, body) = render(ApiError::BadRequest("invalid id")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert_eq!(body, serde_json::json!({"error": "invalid id"}));
    }

    #[tokio::test]
    async fn unauthorized_renders_fixed_message() {
        let (status, _, body) = render(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[test]
    fn task_errors_map_to_statuses() {
        assert_eq!(ApiError::from(TaskError::NotFound), ApiError::NotFound);
        assert_eq!(
            ApiError::from(TaskError::InvalidTitle),
            ApiError::BadRequest("invalid title")
        );
        assert_eq!(
            ApiError::from(TaskError::Storage(RepositoryError::backend("secret dsn leaked"))),
            ApiError::Internal(INTERNAL_ERROR)
        );
        assert_eq!(
            ApiError::from(TaskError::DeadlineExceeded(std::time::Duration::from_secs(5))),
            ApiError::Internal(INTERNAL_ERROR)
        );
    }

    #[test]
    fn external_errors_distinguish_fetch_from_parse() {
        assert_eq!(
            ApiError::from(ExternalError::Transport("timed out".into())),
            ApiError::Internal("failed to fetch external tasks")
        );
        assert_eq!(
            ApiError::from(ExternalError::Status { status: 503, body: String::new() }),
            ApiError::Internal("failed to fetch external tasks")
        );
        assert_eq!(
            ApiError::from(ExternalError::Decode("eof".into())),
            ApiError::Internal("failed to parse external tasks")
        );
    }
}
