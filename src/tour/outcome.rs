use serde_json::Value;

use crate::errors::TourError;
use crate::julep::Execution;

/// Shown when a succeeded execution carries no `final_plan`.
pub const NO_PLAN_PLACEHOLDER: &str = "No plan generated.";

/// How a tour run ended once the platform stopped working on it.
#[derive(Debug, Clone, PartialEq)]
pub enum TourOutcome {
    Completed {
        execution_id: String,
        plan: String,
    },
    WorkflowFailed {
        execution_id: String,
        status: String,
        error: Option<Value>,
    },
}

impl TourOutcome {
    /// Build the outcome from a terminal execution snapshot.
    pub fn from_execution(execution: Execution) -> Self {
        if execution.status.is_succeeded() {
            Self::Completed {
                plan: extract_plan(execution.output.as_ref()),
                execution_id: execution.id,
            }
        } else {
            Self::WorkflowFailed {
                status: execution.status.to_string(),
                error: execution.error,
                execution_id: execution.id,
            }
        }
    }

    pub fn execution_id(&self) -> &str {
        match self {
            Self::Completed { execution_id, .. } | Self::WorkflowFailed { execution_id, .. } => {
                execution_id
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Convert a failed workflow into the matching error variant.
    pub fn into_result(self) -> Result<String, TourError> {
        match self {
            Self::Completed { plan, .. } => Ok(plan),
            Self::WorkflowFailed { status, error, .. } => {
                Err(TourError::WorkflowFailed { status, error })
            }
        }
    }
}

/// Read `final_plan` from an execution output. Strings are returned as-is and
/// other JSON is pretty-printed.
pub fn extract_plan(output: Option<&Value>) -> String {
    match output.and_then(|o| o.get("final_plan")) {
        None | Some(Value::Null) => NO_PLAN_PLACEHOLDER.to_string(),
        Some(Value::String(plan)) => plan.clone(),
        Some(other) => serde_json::to_string_pretty(other)
            .unwrap_or_else(|_| other.to_string()),
    }
}
