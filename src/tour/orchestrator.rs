use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::events::TourEvent;
use super::outcome::TourOutcome;
use super::poll::ExecutionPoller;
use crate::config::{self, TourConfig};
use crate::errors::{RetryConfig, TourError};
use crate::julep::{Agent, CreateAgentRequest, ExecutionInput, OrchestrationClient};

/// Drives one foodie tour run: agent, task, execution, poll, outcome.
pub struct TourOrchestrator {
    client: Arc<dyn OrchestrationClient>,
    config: TourConfig,
    retry: RetryConfig,
    cancel_token: CancellationToken,
    event_tx: Option<mpsc::UnboundedSender<TourEvent>>,
}

impl TourOrchestrator {
    pub fn new(client: Arc<dyn OrchestrationClient>, config: TourConfig) -> Self {
        Self {
            client,
            config,
            retry: RetryConfig::default(),
            cancel_token: CancellationToken::new(),
            event_tx: None,
        }
    }

    /// Replace the orchestrator's cancel token with an external one (e.g. wired to Ctrl-C).
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Attach an event channel for streaming progress to a renderer.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<TourEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn emit(&self, event: TourEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Run one remote call unless the run has been cancelled. A cancel that
    /// arrives mid-call abandons it.
    async fn guarded<T, F>(&self, stage: &str, call: F) -> Result<T, TourError>
    where
        F: Future<Output = Result<T, TourError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => {
                info!(stage, "Tour run cancelled by user");
                Err(TourError::Interrupted {
                    stage: stage.to_string(),
                })
            }
            result = call => result,
        }
    }

    /// Register the configured agent profile and return the created record.
    pub async fn create_agent(&self) -> Result<Agent, TourError> {
        self.emit(TourEvent::AgentRegistering);
        let request = CreateAgentRequest::from(&self.config.agent);
        let agent = self
            .guarded("create agent", self.client.create_agent(&request))
            .await?;

        info!(
            agent_id = %agent.id,
            platform = self.client.platform_name(),
            "Agent created"
        );
        self.emit(TourEvent::AgentCreated {
            agent_id: agent.id.clone(),
        });
        Ok(agent)
    }

    /// Submit the workflow for `agent_id`, run it over `cities` and wait for
    /// the platform to finish. A failed workflow is an `Ok` outcome; only
    /// local and transport problems are errors.
    pub async fn run_tour(&self, agent_id: &str, cities: &[String]) -> Result<TourOutcome, TourError> {
        if cities.is_empty() {
            return Err(TourError::Config("At least one city is required".into()));
        }

        self.emit(TourEvent::WorkflowLoading {
            path: self.config.workflow_path.clone(),
        });
        let workflow = config::load_workflow(&self.config.workflow_path).await?;
        self.emit(TourEvent::WorkflowLoaded);

        let task = self
            .guarded("create task", self.client.create_task(agent_id, &workflow))
            .await?;
        info!(task_id = %task.id, agent_id = %agent_id, "Task created");
        self.emit(TourEvent::TaskCreated {
            task_id: task.id.clone(),
        });

        let input = ExecutionInput::for_cities(cities);
        let execution = self
            .guarded("create execution", self.client.create_execution(&task.id, &input))
            .await?;
        info!(execution_id = %execution.id, task_id = %task.id, "Execution started");
        self.emit(TourEvent::ExecutionStarted {
            execution_id: execution.id.clone(),
            cities: cities.to_vec(),
        });

        let terminal = self.poller().wait_for_terminal(&execution.id).await?;
        Ok(TourOutcome::from_execution(terminal))
    }

    /// Create the agent and run the tour over the configured cities.
    pub async fn run(&self) -> Result<TourOutcome, TourError> {
        let agent = self.create_agent().await?;
        self.run_tour(&agent.id, &self.config.cities).await
    }

    fn poller(&self) -> ExecutionPoller {
        let poller = ExecutionPoller::new(self.client.clone(), self.config.poll.clone())
            .with_retry_config(self.retry.clone())
            .with_cancel_token(self.cancel_token.clone());
        match self.event_tx {
            Some(ref tx) => poller.with_event_channel(tx.clone()),
            None => poller,
        }
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }
}
