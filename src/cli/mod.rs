pub mod commands;
pub mod plan;
pub mod render;
pub mod status;
pub mod validate;

pub use commands::{Cli, Commands};
