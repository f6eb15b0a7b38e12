//! User role models

use serde::{Deserialize, Serialize};

/// Roles a session participant can act under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Farmer,
    Buyer,
    Logistics,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Farmer => write!(f, "FARMER"),
            UserRole::Buyer => write!(f, "BUYER"),
            UserRole::Logistics => write!(f, "LOGISTICS"),
            UserRole::Admin => write!(f, "ADMIN"),
        }
    }
}
