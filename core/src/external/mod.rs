//! External API integrations

pub mod grading;

pub use grading::{GradingClient, GradingOutcome, HarvestAnalysis};
