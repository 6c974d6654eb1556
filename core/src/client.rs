//! Stateless request builder and response parser for the third-party task
//! list that `/v1/external-tasks` forwards.
//!
//! # Design
//! `ExternalTasksClient` holds only the upstream URL. `build_list_tasks`
//! produces an `HttpRequest`, `parse_list_tasks` consumes an `HttpResponse`;
//! the caller performs the I/O in between and owns the timeout.

use serde_json::{Map, Value};

use crate::error::ExternalError;
use crate::http::{HttpRequest, HttpResponse};

/// One upstream task, forwarded as-is.
pub type ExternalTask = Map<String, Value>;

pub const DEFAULT_EXTERNAL_TASKS_URL: &str = "https://jsonplaceholder.typicode.com/todos";

#[derive(Debug, Clone)]
pub struct ExternalTasksClient {
    url: String,
}

impl ExternalTasksClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            url: self.url.clone(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Accepts any 2xx whose body is a JSON array of objects.
    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<ExternalTask>, ExternalError> {
        if !(200..300).contains(&response.status) {
            return Err(ExternalError::Status {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ExternalError::Decode(e.to_string()))
    }
}

impl Default for ExternalTasksClient {
    fn default() -> Self {
        Self::new(DEFAULT_EXTERNAL_TASKS_URL)
    }
}
