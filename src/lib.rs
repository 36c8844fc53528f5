pub mod cli;
pub mod config;
pub mod errors;
pub mod julep;
pub mod reporting;
pub mod tour;
pub mod utils;
