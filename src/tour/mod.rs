pub mod events;
pub mod orchestrator;
pub mod outcome;
pub mod poll;

pub use events::TourEvent;
pub use orchestrator::TourOrchestrator;
pub use outcome::{TourOutcome, NO_PLAN_PLACEHOLDER};
pub use poll::ExecutionPoller;
