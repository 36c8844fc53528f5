pub mod credentials;
pub mod dotenv;
pub mod parser;
pub mod types;

pub use credentials::{Credentials, redact_credentials};
pub use parser::{load_workflow, WorkflowDefinition};
pub use types::*;
