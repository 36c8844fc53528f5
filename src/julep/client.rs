use async_trait::async_trait;

use super::types::{Agent, CreateAgentRequest, Execution, ExecutionInput, Task};
use crate::config::WorkflowDefinition;
use crate::errors::TourError;

/// The four platform calls a tour run needs.
#[async_trait]
pub trait OrchestrationClient: Send + Sync {
    /// Register a new agent
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, TourError>;

    /// Register a task owned by `agent_id` from a workflow document
    async fn create_task(
        &self,
        agent_id: &str,
        workflow: &WorkflowDefinition,
    ) -> Result<Task, TourError>;

    /// Start an execution of a task
    async fn create_execution(
        &self,
        task_id: &str,
        input: &ExecutionInput,
    ) -> Result<Execution, TourError>;

    /// Fetch the current snapshot of an execution
    async fn get_execution(&self, execution_id: &str) -> Result<Execution, TourError>;

    /// Platform name for logging
    fn platform_name(&self) -> &str;
}
