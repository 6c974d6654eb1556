//! Executes `ExternalTasksClient` requests over the network.

use std::time::Duration;

use tasks_core::{ExternalError, ExternalTask, ExternalTasksClient, HttpResponse};

#[derive(Debug, Clone)]
pub struct ExternalTasks {
    client: ExternalTasksClient,
    http: reqwest::Client,
}

impl ExternalTasks {
    /// `timeout` bounds the whole round-trip, body included.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: ExternalTasksClient::new(url),
            http,
        })
    }

    pub async fn fetch(&self) -> Result<Vec<ExternalTask>, ExternalError> {
        let request = self.client.build_list_tasks();
        let mut builder = self.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        self.client.parse_list_tasks(HttpResponse { status, body })
    }
}

fn transport(err: reqwest::Error) -> ExternalError {
    ExternalError::Transport(err.to_string())
}
