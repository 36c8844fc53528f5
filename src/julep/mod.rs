pub mod client;
pub mod http;
pub mod types;

pub use client::OrchestrationClient;
pub use http::JulepClient;
pub use types::{Agent, CreateAgentRequest, Execution, ExecutionInput, ExecutionStatus, Task};
