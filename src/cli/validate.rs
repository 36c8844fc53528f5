use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::TourError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), TourError> {
    let path = PathBuf::from(&args.workflow);
    let workflow = config::load_workflow(&path).await?;

    println!("Workflow is valid: {}", path.display());
    println!("   Name: {}", workflow.name().unwrap_or("<unnamed>"));
    println!("   Sections: {}", workflow.top_level_keys().join(", "));
    Ok(())
}
