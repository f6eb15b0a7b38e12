//! Seaweed Trade Platform - Trade Core
//!
//! The in-process heart of the platform: the harvest-batch and order
//! lifecycle with its generative-text quality-grading integration.
//! State lives in an owned [`session::TradeSession`] for the lifetime of
//! the running session; the only outbound dependency is the grading
//! Oracle reached through [`external::GradingClient`].

pub mod config;
pub mod error;
pub mod external;
pub mod query;
pub mod session;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::TradeSession;
