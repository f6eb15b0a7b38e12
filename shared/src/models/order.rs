//! Order models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A buyer's commitment against one purchased batch, tracked through fulfillment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Weak reference to the settled batch; no cascading delete semantics
    pub batch_id: Uuid,
    pub buyer_id: String,
    /// Mirrors the batch weight at the time of purchase
    pub amount_kg: Decimal,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

/// Fulfillment status of an order
///
/// Forward-moving: `Pending -> Paid -> Shipped -> Delivered`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Position in the fulfillment chain, for forward-only checks
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// Whether `target` is a legal forward move from this status.
    /// Skipping ahead (e.g. Paid -> Delivered) is allowed; moving
    /// backward or staying in place is not.
    pub fn can_advance_to(&self, target: OrderStatus) -> bool {
        target.rank() > self.rank()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Shipped => write!(f, "SHIPPED"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
        }
    }
}
