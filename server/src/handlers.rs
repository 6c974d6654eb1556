//! HTTP adaptation for the task endpoints.
//!
//! Handlers parse query strings and bodies, call `TaskService`, and turn the
//! outcome into a status code and JSON body. No validation rule or storage
//! access lives here.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Query, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use tasks_core::{ExternalTask, TaskId};

use crate::error::ApiError;
use crate::AppState;

/// Query string accepted by `/v1/tasks`. Values stay raw so each handler can
/// report its own parse error. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TaskParams {
    pub id: Option<String>,
    pub done: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for TaskParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("invalid query"))?;
        Ok(Self::from_pairs(pairs))
    }
}

impl TaskParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = TaskParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "id" => &mut params.id,
                "done" => &mut params.done,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|raw| !raw.is_empty())
    }

    fn done(&self) -> Option<&str> {
        self.done.as_deref().filter(|raw| !raw.is_empty())
    }

    fn required_id(&self) -> Result<TaskId, ApiError> {
        let raw = self.id().ok_or(ApiError::BadRequest("id is required"))?;
        parse_id(raw)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub updated: bool,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

pub fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::BadRequest("invalid id"))
}

/// Boolean spellings accepted for `done`.
pub fn parse_done(raw: &str) -> Result<bool, ApiError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ApiError::BadRequest("invalid done value")),
    }
}

/// A JSON `null` decodes to the zero value, like an empty object.
fn decode_body<T: serde::de::DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|_| ApiError::BadRequest("invalid request body"))
}

/// `GET /v1/tasks`: one task when `id` is given (ignoring `done`),
/// otherwise the list, optionally filtered on `done`.
pub async fn list_tasks(
    State(state): State<AppState>,
    params: TaskParams,
) -> Result<Response, ApiError> {
    if let Some(raw) = params.id() {
        let id = parse_id(raw)?;
        let task = state.tasks().get_by_id(id).await?;
        return Ok(Json(task).into_response());
    }

    let done = params.done().map(parse_done).transpose()?;
    let tasks = state.tasks().list(done).await?;
    Ok(Json(tasks).into_response())
}

/// `POST /v1/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: CreateTaskRequest = decode_body(&body)?;
    let task = state.tasks().create(&input.title).await?;
    Ok((StatusCode::CREATED, Json(task)).into_response())
}

/// `PATCH /v1/tasks?id=N`
pub async fn update_task(
    State(state): State<AppState>,
    params: TaskParams,
    body: Bytes,
) -> Result<Json<Updated>, ApiError> {
    let id = params.required_id()?;
    let input: UpdateTaskRequest = decode_body(&body)?;
    state.tasks().update_done(id, input.done).await?;
    Ok(Json(Updated { updated: true }))
}

/// `DELETE /v1/tasks?id=N`
pub async fn delete_task(
    State(state): State<AppState>,
    params: TaskParams,
) -> Result<Json<Deleted>, ApiError> {
    let id = params.required_id()?;
    state.tasks().delete(id).await?;
    Ok(Json(Deleted { deleted: true }))
}

/// `GET /v1/external-tasks`
pub async fn list_external_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExternalTask>>, ApiError> {
    Ok(Json(state.external().fetch().await?))
}

/// Answer for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::CONTENT_TYPE, "application/json")],
    )
}
