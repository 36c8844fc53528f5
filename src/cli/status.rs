use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::plan::{resolve_base_url, spawn_interrupt_handler};
use super::render::render_events;
use crate::cli::commands::StatusArgs;
use crate::config::{Credentials, PollPolicy};
use crate::errors::TourError;
use crate::julep::{Execution, JulepClient, OrchestrationClient};
use crate::reporting::format_outcome;
use crate::tour::{ExecutionPoller, TourOutcome};
use crate::utils::formatting::format_timestamp;

pub async fn handle_status(args: StatusArgs) -> Result<(), TourError> {
    info!(execution_id = %args.execution_id, "Querying execution status");
    if args.interval == 0 {
        return Err(TourError::Config("Poll interval must be at least 1 second".into()));
    }

    let api_key = Credentials::platform_key_from_env()?;
    let base_url = resolve_base_url(args.base_url.clone(), std::env::var("JULEP_BASE_URL").ok());
    let client: Arc<dyn OrchestrationClient> = Arc::new(JulepClient::new(&api_key, &base_url)?);

    let result = if args.follow {
        follow(client, &args).await
    } else {
        client.get_execution(&args.execution_id).await
    };
    let snapshot = result.map_err(|e| e.redacted(&[api_key.as_str()]))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", describe_snapshot(&snapshot));
    }

    match finished_outcome(snapshot) {
        Some(outcome) => {
            if !args.json {
                print!("{}", format_outcome(&outcome));
            }
            outcome.into_result().map(|_| ())
        }
        None => Ok(()),
    }
}

/// The outcome of a terminal snapshot; `None` while the execution is still going.
pub fn finished_outcome(snapshot: Execution) -> Option<TourOutcome> {
    snapshot
        .status
        .is_terminal()
        .then(|| TourOutcome::from_execution(snapshot))
}

async fn follow(
    client: Arc<dyn OrchestrationClient>,
    args: &StatusArgs,
) -> Result<Execution, TourError> {
    let cancel_token = CancellationToken::new();
    spawn_interrupt_handler(cancel_token.clone());

    let policy = PollPolicy {
        interval: Duration::from_secs(args.interval),
        max_attempts: None,
        timeout: None,
    };

    let (tx, rx) = if args.json {
        (None, None)
    } else {
        let (tx, rx) = mpsc::unbounded_channel();
        (Some(tx), Some(rx))
    };
    let renderer = rx.map(|rx| tokio::spawn(render_events(rx)));

    let result = {
        let poller = ExecutionPoller::new(client, policy).with_cancel_token(cancel_token);
        let poller = match tx {
            Some(tx) => poller.with_event_channel(tx),
            None => poller,
        };
        poller.wait_for_terminal(&args.execution_id).await
    };
    if let Some(renderer) = renderer {
        let _ = renderer.await;
    }
    result
}

pub fn describe_snapshot(execution: &Execution) -> String {
    format!(
        "Execution: {}\nTask:      {}\nStatus:    {}\nCreated:   {}\nUpdated:   {}\n",
        execution.id,
        execution.task_id.as_deref().unwrap_or("-"),
        execution.status,
        format_timestamp(execution.created_at.as_ref()),
        format_timestamp(execution.updated_at.as_ref()),
    )
}
