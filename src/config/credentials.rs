use std::fmt;

use crate::errors::TourError;
use tracing::debug;

/// Platform key, the only one this program sends anywhere.
pub const JULEP_API_KEY: &str = "JULEP_API_KEY";
/// Consumed by the weather step of the remote workflow.
pub const OPENWEATHERMAP_API_KEY: &str = "OPENWEATHERMAP_API_KEY";
/// Consumed by the restaurant search step of the remote workflow.
pub const BRAVE_API_KEY: &str = "BRAVE_API_KEY";

pub const REQUIRED_KEYS: [&str; 3] = [JULEP_API_KEY, OPENWEATHERMAP_API_KEY, BRAVE_API_KEY];

/// API keys resolved once at startup and handed to whoever needs them.
#[derive(Clone)]
pub struct Credentials {
    pub julep_api_key: String,
    pub openweathermap_api_key: String,
    pub brave_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, TourError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every required key through `lookup`. Unset and empty values
    /// both count as missing; the error lists them in declaration order.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TourError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(REQUIRED_KEYS.len());
        let mut missing = Vec::new();

        for key in REQUIRED_KEYS {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    debug!(var = %key, "Resolved credential from environment");
                    values.push(value);
                }
                None => missing.push(key.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(TourError::MissingCredentials(missing));
        }

        let mut values = values.into_iter();
        Ok(Self {
            julep_api_key: values.next().unwrap_or_default(),
            openweathermap_api_key: values.next().unwrap_or_default(),
            brave_api_key: values.next().unwrap_or_default(),
        })
    }

    /// Only the platform key, for commands that never start a workflow.
    pub fn platform_key_from_env() -> Result<String, TourError> {
        std::env::var(JULEP_API_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| TourError::MissingCredentials(vec![JULEP_API_KEY.to_string()]))
    }

    pub fn secrets(&self) -> [&str; 3] {
        [
            self.julep_api_key.as_str(),
            self.openweathermap_api_key.as_str(),
            self.brave_api_key.as_str(),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("julep_api_key", &"[REDACTED]")
            .field("openweathermap_api_key", &"[REDACTED]")
            .field("brave_api_key", &"[REDACTED]")
            .finish()
    }
}

/// Redact sensitive values in a string. Secrets shorter than four characters
/// are left alone.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}
