//! Harvest batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A harvested quantity of a single species moving through the trade lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestBatch {
    pub id: Uuid,
    /// Owning farmer identifier, immutable after creation
    pub farmer_id: String,
    /// Free-text taxonomic label (e.g., "Saccharina latissima")
    pub species: String,
    pub weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    pub status: BatchStatus,
    /// Textual grade, set at creation (AI grade or "N/A") and refreshed at approval
    pub quality_grade: Option<String>,
    /// Unit price in USD per kg, absent until approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a harvest batch
///
/// Strictly forward-moving: `Pending -> Approved -> Sold -> Shipped`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Pending,
    Approved,
    Sold,
    Shipped,
}

impl BatchStatus {
    /// Position in the lifecycle chain, for forward-only checks
    pub fn rank(&self) -> u8 {
        match self {
            BatchStatus::Pending => 0,
            BatchStatus::Approved => 1,
            BatchStatus::Sold => 2,
            BatchStatus::Shipped => 3,
        }
    }

    /// Whether `target` is a legal forward move from this status
    pub fn can_advance_to(&self, target: BatchStatus) -> bool {
        target.rank() > self.rank()
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::Pending => write!(f, "PENDING"),
            BatchStatus::Approved => write!(f, "APPROVED"),
            BatchStatus::Sold => write!(f, "SOLD"),
            BatchStatus::Shipped => write!(f, "SHIPPED"),
        }
    }
}

impl HarvestBatch {
    /// A batch is eligible for purchase only while approved
    pub fn is_purchasable(&self) -> bool {
        self.status == BatchStatus::Approved
    }
}
