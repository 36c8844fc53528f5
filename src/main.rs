use clap::Parser;
use console::style;
use foodie_tour::cli::{self, Commands};
use foodie_tour::config::dotenv::{load_env_files, DEFAULT_ENV_FILES};
use foodie_tour::errors::{ErrorCategory, TourError};
use foodie_tour::reporting::formatter::{
    format_header, format_missing_credentials, format_remote_failure_help,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match &cli.env_file {
        Some(path) => {
            if load_env_files(&[path.as_str()]).is_empty() {
                warn!(path = %path, "Env file could not be read");
            }
        }
        None => {
            load_env_files(&DEFAULT_ENV_FILES[..]);
        }
    }

    let result = match cli.into_command() {
        Commands::Plan(args) => {
            print_header();
            cli::plan::handle_plan(args).await
        }
        Commands::Validate(args) => cli::validate::handle_validate(args).await,
        Commands::Status(args) => cli::status::handle_status(args).await,
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(e.exit_code());
    }
}

fn print_header() {
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    print!("{}", style(format_header()).bold());
    println!(
        "{}\n",
        style(format!(
            "v{} ({}, built {})",
            env!("CARGO_PKG_VERSION"),
            git_hash,
            env!("BUILD_DATE")
        ))
        .dim()
    );
}

fn report_error(e: &TourError) {
    match e {
        TourError::MissingCredentials(missing) => {
            eprint!("{}", format_missing_credentials(missing));
        }
        TourError::WorkflowNotFound(path) => {
            eprintln!("{} {} not found.", style("❌ Error:").red(), path.display());
            eprintln!("   Please ensure the workflow definition file is in the same directory.");
        }
        // The failure report has already been printed with the outcome.
        TourError::WorkflowFailed { .. } => {}
        _ if e.classify().category == ErrorCategory::Remote => {
            eprintln!("\nAn unexpected error occurred: {}", e);
            eprintln!("\n{}", format_remote_failure_help());
        }
        _ => eprintln!("Error: {}", e),
    }
}
