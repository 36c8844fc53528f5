use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AgentProfile;

/// Statuses that mean the platform is still working on an execution.
pub const NON_TERMINAL_STATUSES: [&str; 3] = ["starting", "queued", "running"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAgentRequest {
    pub name: String,
    pub about: String,
    pub model: String,
}

impl From<&AgentProfile> for CreateAgentRequest {
    fn from(profile: &AgentProfile) -> Self {
        Self {
            name: profile.name.clone(),
            about: profile.about.clone(),
            model: profile.model.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Input passed to a new execution of the foodie tour task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionInput {
    pub locations: Vec<String>,
}

impl ExecutionInput {
    pub fn for_cities(cities: &[String]) -> Self {
        Self {
            locations: cities.to_vec(),
        }
    }
}

/// Execution status as reported by the platform. Unknown values are kept
/// verbatim and treated as terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionStatus(String);

impl ExecutionStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_terminal(&self) -> bool {
        !NON_TERMINAL_STATUSES.contains(&self.0.as_str())
    }

    pub fn is_succeeded(&self) -> bool {
        self.0 == "succeeded"
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExecutionStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A snapshot of a remote execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Execution {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
