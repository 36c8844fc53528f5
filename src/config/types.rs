use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKFLOW_PATH: &str = "foodie_tour_task.yaml";
pub const DEFAULT_BASE_URL: &str = "https://api.julep.ai/api";
pub const DEFAULT_CITIES: [&str; 3] = ["Paris", "Tokyo", "Mumbai"];

#[derive(Debug, Clone)]
pub struct TourConfig {
    pub workflow_path: PathBuf,
    pub cities: Vec<String>,
    pub agent: AgentProfile,
    pub base_url: String,
    pub poll: PollPolicy,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            workflow_path: PathBuf::from(DEFAULT_WORKFLOW_PATH),
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            agent: AgentProfile::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll: PollPolicy::default(),
        }
    }
}

/// The agent registered on the platform at the start of every run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    pub about: String,
    pub model: String,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: "Foodie Tour Guide".to_string(),
            about: "An AI agent that designs personalized, weather-aware food tours based on a structured workflow.".to_string(),
            model: "claude-3.5-sonnet".to_string(),
        }
    }
}

/// How long and how often to check an execution's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Upper bound on status checks; `None` means no bound.
    pub max_attempts: Option<u32>,
    /// Upper bound on total polling time; `None` means no bound.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: None,
            timeout: Some(Duration::from_secs(30 * 60)),
        }
    }
}

impl PollPolicy {
    /// True once another check would exceed either bound.
    pub fn exhausted(&self, attempts: u32, elapsed: Duration) -> bool {
        if self.max_attempts.is_some_and(|max| attempts >= max) {
            return true;
        }
        self.timeout
            .is_some_and(|limit| elapsed + self.interval > limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_config_defaults() {
        let config = TourConfig::default();
        assert_eq!(config.workflow_path, PathBuf::from("foodie_tour_task.yaml"));
        assert_eq!(config.cities, vec!["Paris", "Tokyo", "Mumbai"]);
        assert_eq!(config.base_url, "https://api.julep.ai/api");
        assert_eq!(config.agent.name, "Foodie Tour Guide");
        assert_eq!(config.agent.model, "claude-3.5-sonnet");
    }

    #[test]
    fn test_poll_policy_default() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(10));
        assert_eq!(policy.max_attempts, None);
        assert_eq!(policy.timeout, Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_unbounded_policy_never_exhausts() {
        let policy = PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: None,
            timeout: None,
        };
        assert!(!policy.exhausted(10_000, Duration::from_secs(86_400)));
    }

    #[test]
    fn test_max_attempts_bound() {
        let policy = PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: Some(3),
            timeout: None,
        };
        assert!(!policy.exhausted(2, Duration::ZERO));
        assert!(policy.exhausted(3, Duration::ZERO));
    }

    #[test]
    fn test_timeout_accounts_for_next_sleep() {
        let policy = PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: None,
            timeout: Some(Duration::from_secs(60)),
        };
        assert!(!policy.exhausted(1, Duration::from_secs(50)));
        assert!(policy.exhausted(1, Duration::from_secs(51)));
    }
}
