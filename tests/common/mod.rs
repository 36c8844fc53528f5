#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use foodie_tour::config::{PollPolicy, TourConfig, WorkflowDefinition};
use foodie_tour::errors::TourError;
use foodie_tour::julep::{
    Agent, CreateAgentRequest, Execution, ExecutionInput, ExecutionStatus, OrchestrationClient, Task,
};
use serde_json::Value;

pub const WORKFLOW_YAML: &str = r#"
name: Foodie Tour Planner
description: One-day weather-aware foodie tours
input_schema:
  type: object
  properties:
    locations:
      type: array
      items:
        type: string
main:
  - over: $ steps[0].input.locations
    map:
      tool: weather
      arguments:
        location: $ _
  - evaluate:
      final_plan: $ "tour"
"#;

#[derive(Default)]
pub struct CallCounts {
    pub create_agent: AtomicUsize,
    pub create_task: AtomicUsize,
    pub create_execution: AtomicUsize,
    pub get_execution: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// In-memory platform that replays a scripted sequence of execution snapshots.
/// When the script runs dry the last snapshot is repeated.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Result<Execution, TourError>>>,
    last: Mutex<Option<Execution>>,
    task_error: Mutex<Option<TourError>>,
    pub counts: CallCounts,
    pub task_bodies: Mutex<Vec<Value>>,
    pub execution_inputs: Mutex<Vec<ExecutionInput>>,
}

pub fn snapshot(status: &str) -> Execution {
    Execution {
        id: "exec-1".into(),
        task_id: Some("task-1".into()),
        status: ExecutionStatus::from(status),
        output: None,
        error: None,
        created_at: None,
        updated_at: None,
    }
}

impl ScriptedClient {
    pub fn with_statuses(statuses: &[&str]) -> Self {
        Self::with_script(statuses.iter().map(|s| Ok(snapshot(s))).collect())
    }

    pub fn with_script(script: Vec<Result<Execution, TourError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            task_error: Mutex::new(None),
            counts: CallCounts::default(),
            task_bodies: Mutex::new(Vec::new()),
            execution_inputs: Mutex::new(Vec::new()),
        }
    }

    /// Attach output and error payloads to the final scripted snapshot.
    pub fn finishing_with(self, output: Option<Value>, error: Option<Value>) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            if let Some(Ok(last)) = script.back_mut() {
                last.output = output;
                last.error = error;
            }
        }
        self
    }

    pub fn failing_task_creation(self, err: TourError) -> Self {
        *self.task_error.lock().unwrap() = Some(err);
        self
    }
}

#[async_trait]
impl OrchestrationClient for ScriptedClient {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, TourError> {
        self.counts.create_agent.fetch_add(1, Ordering::SeqCst);
        Ok(Agent {
            id: "agent-1".into(),
            name: Some(request.name.clone()),
            about: Some(request.about.clone()),
            model: Some(request.model.clone()),
        })
    }

    async fn create_task(
        &self,
        agent_id: &str,
        workflow: &WorkflowDefinition,
    ) -> Result<Task, TourError> {
        self.counts.create_task.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.task_error.lock().unwrap().take() {
            return Err(err);
        }
        self.task_bodies.lock().unwrap().push(workflow.body().clone());
        Ok(Task {
            id: "task-1".into(),
            agent_id: Some(agent_id.to_string()),
            name: workflow.name().map(str::to_string),
        })
    }

    async fn create_execution(
        &self,
        task_id: &str,
        input: &ExecutionInput,
    ) -> Result<Execution, TourError> {
        self.counts.create_execution.fetch_add(1, Ordering::SeqCst);
        self.execution_inputs.lock().unwrap().push(input.clone());
        let mut exec = snapshot("queued");
        exec.task_id = Some(task_id.to_string());
        Ok(exec)
    }

    async fn get_execution(&self, _execution_id: &str) -> Result<Execution, TourError> {
        self.counts.get_execution.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(exec)) => {
                *self.last.lock().unwrap() = Some(exec.clone());
                Ok(exec)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| TourError::Network("script exhausted".into())),
        }
    }

    fn platform_name(&self) -> &str {
        "scripted"
    }
}

pub fn write_workflow(dir: &Path) -> PathBuf {
    let path = dir.join("foodie_tour_task.yaml");
    std::fs::write(&path, WORKFLOW_YAML).unwrap();
    path
}

/// Config with a near-zero poll interval so tests run fast.
pub fn fast_config(workflow_path: PathBuf) -> TourConfig {
    TourConfig {
        workflow_path,
        poll: PollPolicy {
            interval: Duration::from_millis(1),
            max_attempts: None,
            timeout: None,
        },
        ..TourConfig::default()
    }
}
