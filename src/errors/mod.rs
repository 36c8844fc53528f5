pub mod types;
pub mod classification;
pub mod retry;

pub use types::TourError;
pub use classification::{ErrorCategory, ErrorClassification};
pub use retry::{RetryConfig, with_retry};
