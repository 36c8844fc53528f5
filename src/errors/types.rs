use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourError {
    #[error("Missing required API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("Workflow file not found: {}", .0.display())]
    WorkflowNotFound(PathBuf),

    #[error("Invalid workflow definition: {0}")]
    InvalidWorkflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Platform API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode platform response: {0}")]
    Decode(String),

    #[error("Execution {execution_id} still '{last_status}' after {attempts} status checks")]
    PollTimeout {
        execution_id: String,
        attempts: u32,
        last_status: String,
    },

    #[error("Polling cancelled for execution {execution_id}")]
    Cancelled { execution_id: String },

    #[error("Interrupted during {stage}")]
    Interrupted { stage: String },

    #[error("Workflow failed with state: {status}")]
    WorkflowFailed {
        status: String,
        error: Option<serde_json::Value>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TourError {
    /// Mask secret values that may have been echoed back in remote messages.
    pub fn redacted(self, secrets: &[&str]) -> Self {
        use crate::config::redact_credentials as redact;
        match self {
            TourError::Authentication(m) => TourError::Authentication(redact(&m, secrets)),
            TourError::RateLimit(m) => TourError::RateLimit(redact(&m, secrets)),
            TourError::Timeout(m) => TourError::Timeout(redact(&m, secrets)),
            TourError::Network(m) => TourError::Network(redact(&m, secrets)),
            TourError::Decode(m) => TourError::Decode(redact(&m, secrets)),
            TourError::Api { status, message } => TourError::Api {
                status,
                message: redact(&message, secrets),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_masks_remote_messages() {
        let err = TourError::Api {
            status: 400,
            message: "invalid key sk-live-1234".into(),
        };
        let redacted = err.redacted(&["sk-live-1234"]);
        assert_eq!(redacted.to_string(), "Platform API error (400): invalid key [REDACTED]");
    }

    #[test]
    fn test_redacted_leaves_local_errors() {
        let err = TourError::Config("sk-live-1234".into()).redacted(&["sk-live-1234"]);
        assert!(matches!(err, TourError::Config(m) if m == "sk-live-1234"));
    }
}
