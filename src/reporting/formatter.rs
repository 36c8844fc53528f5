use serde_json::Value;

use crate::tour::TourOutcome;

pub const APP_TITLE: &str = "AI Foodie Tour Planner";
pub const PLAN_TITLE: &str = "YOUR PERSONALIZED FOODIE TOUR PLAN";

const RULE_WIDTH: usize = 50;
const TITLE_RULE_WIDTH: usize = 30;

pub fn format_header() -> String {
    format!("{}\n{}\n", APP_TITLE, "=".repeat(TITLE_RULE_WIDTH))
}

/// Render the final report for a finished execution.
pub fn format_outcome(outcome: &TourOutcome) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    match outcome {
        TourOutcome::Completed { plan, .. } => format!(
            "{}\nWorkflow completed successfully!\n\n{}\n{}\n{}\n",
            rule,
            PLAN_TITLE,
            "=".repeat(TITLE_RULE_WIDTH),
            plan,
        ),
        TourOutcome::WorkflowFailed { status, error, .. } => format!(
            "{}\nWorkflow failed with state: {}\nError details: {}\n",
            rule,
            status,
            format_error_payload(error.as_ref()),
        ),
    }
}

/// Compact JSON for structured errors, plain text for string errors.
pub fn format_error_payload(error: Option<&Value>) -> String {
    match error {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn format_missing_credentials(missing: &[String]) -> String {
    format!(
        "Error: Missing required API keys in your .env file: {}\nPlease create a .env file from env_example.txt and add your keys.\n",
        missing.join(", ")
    )
}

pub fn format_remote_failure_help() -> String {
    [
        "Help:",
        "   • Ensure all API keys are correctly set in your .env file.",
        "   • Check your internet connection and firewall settings.",
        "   • If the problem persists, visit https://docs.julep.ai for help.",
    ]
    .join("\n")
}
