//! Domain models for the Seaweed Trade Platform

mod batch;
mod order;
mod user;

pub use batch::*;
pub use order::*;
pub use user::*;
