use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::TourError;

const MAX_WORKFLOW_BYTES: u64 = 1_048_576;

/// A declarative task document, forwarded to the platform untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkflowDefinition {
    body: Value,
}

impl WorkflowDefinition {
    /// Wrap an already-parsed document. Only mappings are accepted since the
    /// platform expects an object body.
    pub fn from_value(body: Value) -> Result<Self, TourError> {
        if !body.is_object() {
            return Err(TourError::InvalidWorkflow(
                "top level must be a mapping of task fields".into(),
            ));
        }
        Ok(Self { body })
    }

    pub fn name(&self) -> Option<&str> {
        self.body.get("name").and_then(Value::as_str)
    }

    pub fn top_level_keys(&self) -> Vec<&str> {
        self.body
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Read and parse a workflow file. Its contents are not validated beyond
/// being a YAML mapping; schema errors surface from the platform instead.
pub async fn load_workflow(path: &Path) -> Result<WorkflowDefinition, TourError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TourError::WorkflowNotFound(PathBuf::from(path)));
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(TourError::WorkflowNotFound(PathBuf::from(path)));
    }
    if metadata.len() > MAX_WORKFLOW_BYTES {
        return Err(TourError::Config(format!(
            "Workflow file exceeds 1MB limit: {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_workflow(&content)
}

pub fn parse_workflow(content: &str) -> Result<WorkflowDefinition, TourError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    let body = serde_json::to_value(&yaml)
        .map_err(|e| TourError::InvalidWorkflow(format!("cannot convert to JSON: {}", e)))?;
    let workflow = WorkflowDefinition::from_value(body)?;
    debug!(name = workflow.name().unwrap_or("<unnamed>"), "Parsed workflow definition");
    Ok(workflow)
}
