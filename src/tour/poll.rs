use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::events::TourEvent;
use crate::config::PollPolicy;
use crate::errors::{with_retry, RetryConfig, TourError};
use crate::julep::{Execution, OrchestrationClient};

/// Checks an execution's status until the platform reports a terminal one,
/// a poll bound is hit, or the token is cancelled.
pub struct ExecutionPoller {
    client: Arc<dyn OrchestrationClient>,
    policy: PollPolicy,
    retry: RetryConfig,
    cancel_token: CancellationToken,
    event_tx: Option<mpsc::UnboundedSender<TourEvent>>,
}

impl ExecutionPoller {
    pub fn new(client: Arc<dyn OrchestrationClient>, policy: PollPolicy) -> Self {
        Self {
            client,
            policy,
            retry: RetryConfig::default(),
            cancel_token: CancellationToken::new(),
            event_tx: None,
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<TourEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: TourEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    fn cancelled(&self, execution_id: &str) -> TourError {
        info!(execution_id = %execution_id, "Polling cancelled by user");
        TourError::Cancelled {
            execution_id: execution_id.to_string(),
        }
    }

    /// Poll until a terminal snapshot arrives and return it.
    pub async fn wait_for_terminal(&self, execution_id: &str) -> Result<Execution, TourError> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if self.cancel_token.is_cancelled() {
                return Err(self.cancelled(execution_id));
            }

            let fetch = with_retry("get execution", &self.retry, || {
                self.client.get_execution(execution_id)
            });
            let snapshot = tokio::select! {
                _ = self.cancel_token.cancelled() => return Err(self.cancelled(execution_id)),
                result = fetch => result?,
            };

            attempts += 1;
            let elapsed = started.elapsed();
            debug!(
                execution_id = %execution_id,
                attempt = attempts,
                status = %snapshot.status,
                "Execution status"
            );
            self.emit(TourEvent::StatusObserved {
                status: snapshot.status.clone(),
                attempt: attempts,
                elapsed,
            });

            if snapshot.status.is_terminal() {
                info!(
                    execution_id = %execution_id,
                    status = %snapshot.status,
                    attempts,
                    "Execution reached terminal status"
                );
                self.emit(TourEvent::Finished {
                    status: snapshot.status.clone(),
                    attempts,
                    elapsed,
                });
                return Ok(snapshot);
            }

            if self.policy.exhausted(attempts, elapsed) {
                warn!(
                    execution_id = %execution_id,
                    attempts,
                    elapsed_secs = elapsed.as_secs(),
                    "Poll limit reached before execution finished"
                );
                return Err(TourError::PollTimeout {
                    execution_id: execution_id.to_string(),
                    attempts,
                    last_status: snapshot.status.to_string(),
                });
            }

            self.emit(TourEvent::Waiting {
                interval: self.policy.interval,
            });
            tokio::select! {
                _ = self.cancel_token.cancelled() => return Err(self.cancelled(execution_id)),
                _ = tokio::time::sleep(self.policy.interval) => {}
            }
        }
    }
}
