//! Shared types and models for the Seaweed Trade Platform
//!
//! This crate contains the domain model (harvest batches, orders, roles)
//! and common types shared between the trade core and any other consumer
//! of the platform data.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
