use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::render::render_events;
use crate::cli::commands::PlanArgs;
use crate::config::{Credentials, PollPolicy, TourConfig, DEFAULT_BASE_URL};
use crate::errors::TourError;
use crate::julep::{JulepClient, OrchestrationClient};
use crate::reporting::format_outcome;
use crate::tour::{TourOrchestrator, TourOutcome};

pub async fn handle_plan(args: PlanArgs) -> Result<(), TourError> {
    let cancel_token = CancellationToken::new();
    spawn_interrupt_handler(cancel_token.clone());

    let outcome = run_plan(&args, |key| std::env::var(key).ok(), connect_julep, cancel_token).await?;
    print!("{}", format_outcome(&outcome));
    outcome.into_result().map(|_| ())
}

fn connect_julep(
    credentials: &Credentials,
    config: &TourConfig,
) -> Result<Arc<dyn OrchestrationClient>, TourError> {
    let client: Arc<dyn OrchestrationClient> =
        Arc::new(JulepClient::new(&credentials.julep_api_key, &config.base_url)?);
    Ok(client)
}

/// Resolve credentials through `lookup`, connect with `connect` and run one
/// tour. Nothing is connected until every required key is present.
pub async fn run_plan<L, C>(
    args: &PlanArgs,
    lookup: L,
    connect: C,
    cancel_token: CancellationToken,
) -> Result<TourOutcome, TourError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&Credentials, &TourConfig) -> Result<Arc<dyn OrchestrationClient>, TourError>,
{
    let credentials = Credentials::from_lookup(&lookup)?;
    let config = build_tour_config(args, lookup("JULEP_BASE_URL"))?;
    info!(
        cities = ?config.cities,
        workflow = %config.workflow_path.display(),
        base_url = %config.base_url,
        "Starting foodie tour"
    );

    let client = connect(&credentials, &config)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(render_events(rx));

    let result = {
        let orchestrator = TourOrchestrator::new(client, config)
            .with_event_channel(tx)
            .with_cancel_token(cancel_token);
        orchestrator.run().await
    };
    // The orchestrator (and its sender) is gone, so the renderer drains and exits.
    let _ = renderer.await;

    result.map_err(|e| e.redacted(&credentials.secrets()))
}

/// Cancel `token` on the first Ctrl-C.
pub(crate) fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, stopping...");
            token.cancel();
        }
    });
}

/// Build the run configuration from CLI args. The base URL comes from the
/// flag, then `env_base_url`, then the public endpoint.
pub fn build_tour_config(
    args: &PlanArgs,
    env_base_url: Option<String>,
) -> Result<TourConfig, TourError> {
    if args.interval == 0 {
        return Err(TourError::Config("Poll interval must be at least 1 second".into()));
    }
    if args.max_polls == Some(0) {
        return Err(TourError::Config("--max-polls must be at least 1".into()));
    }

    let defaults = TourConfig::default();
    let cities: Vec<String> = args
        .cities
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    Ok(TourConfig {
        workflow_path: PathBuf::from(&args.workflow),
        cities: if cities.is_empty() { defaults.cities } else { cities },
        agent: defaults.agent,
        base_url: resolve_base_url(args.base_url.clone(), env_base_url),
        poll: PollPolicy {
            interval: Duration::from_secs(args.interval),
            max_attempts: args.max_polls,
            timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
        },
    })
}

pub(crate) fn resolve_base_url(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env)
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
