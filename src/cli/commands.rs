use clap::{Args, Parser, Subcommand};

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0  tour planned (or status shown)
  1  workflow failed or unexpected error
  2  configuration problem: missing API keys, workflow file not found or invalid
  3  polling timed out or was interrupted
  4  the platform rejected the API key";

#[derive(Parser)]
#[command(
    name = "foodie-tour",
    version,
    about = "Plan a weather-aware foodie tour with a hosted agent workflow",
    after_help = EXIT_CODES_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default `plan` command
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Load environment variables from this file instead of .env.local/.env
    #[arg(long, global = true)]
    pub env_file: Option<String>,
}

impl Cli {
    /// The command to run; no subcommand means `plan`.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Plan(self.plan))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an agent and task, run the tour workflow and print the plan (default)
    Plan(PlanArgs),
    /// Parse the workflow file locally without contacting the platform
    Validate(ValidateArgs),
    /// Show the status of an existing execution
    Status(StatusArgs),
}

#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// City to plan a tour for (repeatable; defaults to Paris, Tokyo, Mumbai)
    #[arg(short, long = "city")]
    pub cities: Vec<String>,

    /// Workflow definition file
    #[arg(short, long, default_value = "foodie_tour_task.yaml")]
    pub workflow: String,

    /// Seconds between status checks
    #[arg(long, default_value = "10")]
    pub interval: u64,

    /// Give up after this many status checks
    #[arg(long)]
    pub max_polls: Option<u32>,

    /// Give up after this many seconds of polling (0 waits forever)
    #[arg(long, default_value = "1800")]
    pub timeout: u64,

    /// Platform API base URL (or JULEP_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Workflow definition file to check
    #[arg(short, long, default_value = "foodie_tour_task.yaml")]
    pub workflow: String,
}

#[derive(Args, Clone, Debug)]
pub struct StatusArgs {
    /// Execution ID to query
    pub execution_id: String,

    /// Keep polling until the execution finishes
    #[arg(short, long)]
    pub follow: bool,

    /// Poll interval in seconds
    #[arg(long, default_value = "10")]
    pub interval: u64,

    /// Output the raw execution record as JSON
    #[arg(long)]
    pub json: bool,

    /// Platform API base URL (or JULEP_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_plan_with_defaults() {
        let cli = Cli::try_parse_from(["foodie-tour"]).unwrap();
        match cli.into_command() {
            Commands::Plan(args) => {
                assert!(args.cities.is_empty());
                assert_eq!(args.workflow, "foodie_tour_task.yaml");
                assert_eq!(args.interval, 10);
                assert_eq!(args.timeout, 1800);
                assert_eq!(args.max_polls, None);
            }
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_top_level_plan_flags() {
        let cli = Cli::try_parse_from(["foodie-tour", "--city", "Lima", "-c", "Oaxaca", "--max-polls", "5"])
            .unwrap();
        match cli.into_command() {
            Commands::Plan(args) => {
                assert_eq!(args.cities, vec!["Lima", "Oaxaca"]);
                assert_eq!(args.max_polls, Some(5));
            }
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_status_subcommand() {
        let cli = Cli::try_parse_from(["foodie-tour", "-v", "status", "exec-123", "--follow"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.into_command() {
            Commands::Status(args) => {
                assert_eq!(args.execution_id, "exec-123");
                assert!(args.follow);
                assert!(!args.json);
            }
            _ => panic!("expected status"),
        }
    }

    #[test]
    fn test_global_flags_before_subcommands() {
        let cli = Cli::try_parse_from(["foodie-tour", "--no-color", "validate"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.into_command(), Commands::Validate(_)));

        let cli =
            Cli::try_parse_from(["foodie-tour", "--env-file", "x.env", "plan", "-c", "Lima"]).unwrap();
        assert_eq!(cli.env_file.as_deref(), Some("x.env"));
        match cli.into_command() {
            Commands::Plan(args) => assert_eq!(args.cities, vec!["Lima"]),
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["foodie-tour", "status", "exec-1", "-vv", "--no-color"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_help_lists_exit_codes() {
        use clap::CommandFactory;
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Exit codes:"));
        assert!(help.contains("2  configuration problem: missing API keys"));
    }

    #[test]
    fn test_validate_subcommand() {
        let cli = Cli::try_parse_from(["foodie-tour", "validate", "-w", "other.yaml"]).unwrap();
        match cli.into_command() {
            Commands::Validate(args) => assert_eq!(args.workflow, "other.yaml"),
            _ => panic!("expected validate"),
        }
    }
}
