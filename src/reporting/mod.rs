pub mod formatter;

pub use formatter::{format_header, format_outcome};
