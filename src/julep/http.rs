use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::client::OrchestrationClient;
use super::types::{Agent, CreateAgentRequest, Execution, ExecutionInput, Task};
use crate::config::WorkflowDefinition;
use crate::errors::TourError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_ERROR_MESSAGE: usize = 500;

/// REST client for the Julep agent platform.
pub struct JulepClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl JulepClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, TourError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("foodie-tour/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TourError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T, TourError> {
        let resp = request
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TourError::Timeout(format!("{} timed out: {}", operation, e))
                } else {
                    TourError::Network(format!("{} request failed: {}", operation, e))
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TourError::Network(format!("{} response unreadable: {}", operation, e)))?;

        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| TourError::Decode(format!("{}: {}", operation, e)))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> TourError {
    let message = extract_error_message(body);
    match status.as_u16() {
        401 | 403 => TourError::Authentication(message),
        429 => TourError::RateLimit(message),
        408 | 504 => TourError::Timeout(message),
        code => TourError::Api {
            status: code,
            message,
        },
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw text.
fn extract_error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|data| {
        data["error"]["message"]
            .as_str()
            .or_else(|| data["error"].as_str())
            .or_else(|| data["message"].as_str())
            .or_else(|| data["detail"].as_str())
            .map(str::to_string)
    });

    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        return "empty response body".to_string();
    }
    if message.chars().count() > MAX_ERROR_MESSAGE {
        let truncated: String = message.chars().take(MAX_ERROR_MESSAGE).collect();
        format!("{}... [truncated]", truncated)
    } else {
        message
    }
}

#[async_trait]
impl OrchestrationClient for JulepClient {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, TourError> {
        let url = self.url("/agents");
        debug!(url = %url, name = %request.name, "Creating agent");
        self.send(self.client.post(url).json(request), "create agent").await
    }

    async fn create_task(
        &self,
        agent_id: &str,
        workflow: &WorkflowDefinition,
    ) -> Result<Task, TourError> {
        let url = self.url(&format!("/agents/{}/tasks", agent_id));
        debug!(url = %url, workflow = workflow.name().unwrap_or("<unnamed>"), "Creating task");
        self.send(self.client.post(url).json(workflow), "create task").await
    }

    async fn create_execution(
        &self,
        task_id: &str,
        input: &ExecutionInput,
    ) -> Result<Execution, TourError> {
        let url = self.url(&format!("/tasks/{}/executions", task_id));
        debug!(url = %url, locations = input.locations.len(), "Creating execution");
        let body = json!({ "input": input });
        self.send(self.client.post(url).json(&body), "create execution").await
    }

    async fn get_execution(&self, execution_id: &str) -> Result<Execution, TourError> {
        let url = self.url(&format!("/executions/{}", execution_id));
        debug!(url = %url, "Fetching execution");
        self.send(self.client.get(url), "get execution").await
    }

    fn platform_name(&self) -> &str {
        "julep"
    }
}
