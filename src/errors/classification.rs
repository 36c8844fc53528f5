use super::types::TourError;

/// Where an error originated, used to pick the exit code and the help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Remote,
    Workflow,
    Local,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
    pub category: ErrorCategory,
}

impl TourError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        use ErrorCategory::*;

        let (error_type, retryable, category) = match self {
            // Retryable errors
            TourError::RateLimit(_) => ("RateLimitError", true, Remote),
            TourError::Network(_) => ("NetworkError", true, Remote),
            TourError::Timeout(_) => ("TimeoutError", true, Remote),
            TourError::Api { status, .. } => ("ApiError", *status >= 500, Remote),

            // Non-retryable errors
            TourError::Authentication(_) => ("AuthenticationError", false, Remote),
            TourError::Decode(_) => ("DecodeError", false, Remote),
            TourError::MissingCredentials(_) => ("MissingCredentialsError", false, Configuration),
            TourError::WorkflowNotFound(_) => ("WorkflowNotFoundError", false, Configuration),
            TourError::InvalidWorkflow(_) => ("InvalidWorkflowError", false, Configuration),
            TourError::Config(_) => ("ConfigError", false, Configuration),
            TourError::Yaml(_) => ("YamlError", false, Configuration),
            TourError::PollTimeout { .. } => ("PollTimeoutError", false, Workflow),
            TourError::Cancelled { .. } => ("CancelledError", false, Workflow),
            TourError::Interrupted { .. } => ("InterruptedError", false, Workflow),
            TourError::WorkflowFailed { .. } => ("WorkflowFailedError", false, Workflow),
            TourError::Io(_) => ("IoError", false, Local),
            TourError::Json(_) => ("JsonError", false, Local),
        };

        ErrorClassification {
            error_type,
            retryable,
            category,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TourError::Authentication(_) => 4,
            TourError::PollTimeout { .. }
            | TourError::Cancelled { .. }
            | TourError::Interrupted { .. } => 3,
            _ if self.classify().category == ErrorCategory::Configuration => 2,
            _ => 1,
        }
    }
}
