use console::style;
use tokio::sync::mpsc;

use crate::tour::TourEvent;
use crate::utils::formatting::format_elapsed;

/// Print progress lines for every event until the sender side is dropped.
pub async fn render_events(mut rx: mpsc::UnboundedReceiver<TourEvent>) {
    while let Some(event) = rx.recv().await {
        if let Some(line) = describe_event(&event) {
            println!("{}", line);
        }
    }
}

/// The console line for an event, if it has one.
pub fn describe_event(event: &TourEvent) -> Option<String> {
    let line = match event {
        TourEvent::AgentRegistering => "Creating a new agent...".to_string(),
        TourEvent::AgentCreated { agent_id } => format!(
            "Agent created successfully. Agent ID: {}\n",
            style(agent_id).cyan()
        ),
        TourEvent::WorkflowLoading { path } => {
            format!("   -> Loading workflow from {}...", path.display())
        }
        TourEvent::WorkflowLoaded => "   -> Creating task on Julep platform...".to_string(),
        TourEvent::TaskCreated { task_id } => format!(
            "   {} Task created successfully! Task ID: {}",
            style("✅").green(),
            style(task_id).cyan()
        ),
        TourEvent::ExecutionStarted {
            execution_id,
            cities,
        } => format!(
            "\n🚀 Kicking off the foodie tour generation...\n   Cities: {}\n   Workflow started! Execution ID: {}\n   Please wait, this may take a few minutes as the AI plans your tours...",
            cities.join(", "),
            style(execution_id).cyan()
        ),
        TourEvent::StatusObserved { status, .. } => {
            format!("   Current status: {}...", style(status).yellow())
        }
        TourEvent::Waiting { .. } => return None,
        TourEvent::Finished {
            attempts, elapsed, ..
        } => format!(
            "   {}",
            style(format!(
                "Finished after {} status checks in {}",
                attempts,
                format_elapsed(*elapsed)
            ))
            .dim()
        ),
    };
    Some(line)
}
