use std::path::PathBuf;
use std::time::Duration;

use crate::julep::ExecutionStatus;

/// Progress messages sent from a tour run to whatever is displaying it.
#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    /// Agent registration is about to be requested
    AgentRegistering,
    /// Agent registered on the platform
    AgentCreated { agent_id: String },
    /// Reading the workflow file
    WorkflowLoading { path: PathBuf },
    /// Workflow parsed and about to be submitted
    WorkflowLoaded,
    /// Task registered on the platform
    TaskCreated { task_id: String },
    /// Execution started for the given cities
    ExecutionStarted {
        execution_id: String,
        cities: Vec<String>,
    },
    /// One status check completed
    StatusObserved {
        status: ExecutionStatus,
        attempt: u32,
        elapsed: Duration,
    },
    /// Sleeping before the next status check
    Waiting { interval: Duration },
    /// The execution reached a terminal status
    Finished {
        status: ExecutionStatus,
        attempts: u32,
        elapsed: Duration,
    },
}
