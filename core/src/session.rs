//! Trade session: the owned in-memory stores and their lifecycle operations
//!
//! A [`TradeSession`] exclusively owns the batch and order collections for
//! one running session. All mutation flows through the four operations
//! below (submit, approve, purchase, advance); invalid transitions are
//! silent no-ops rather than errors so retry-style bulk actions stay safe.
//! Nothing here suspends; the only async step in the system is the
//! grading call on [`GradingClient`](crate::external::GradingClient).

use chrono::Utc;
use rust_decimal::Decimal;
use shared::{
    validate_harvest_description, validate_species, validate_weight_kg, BatchStatus, HarvestBatch,
    Order, OrderStatus,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::{GradingClient, GradingOutcome};

/// Default grade assigned by the admin approval path
pub const APPROVAL_DEFAULT_GRADE: &str = "A";

/// Default unit price (USD/kg) assigned by the admin approval path
pub fn approval_default_price() -> Decimal {
    Decimal::new(125, 1) // 12.5
}

/// Farmer input for a new batch submission
#[derive(Debug, Clone)]
pub struct SubmitBatchInput {
    pub farmer_id: String,
    pub species: String,
    pub weight_kg: Decimal,
}

/// In-memory session state for one run of the platform.
///
/// Both collections are volatile and insertion-ordered; they exist only
/// for the lifetime of the session.
#[derive(Debug, Default)]
pub struct TradeSession {
    batches: Vec<HarvestBatch>,
    orders: Vec<Order>,
}

impl TradeSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------

    /// Farmer submission: append a new `Pending` batch.
    ///
    /// The grading outcome is an enrichment only: an unavailable or
    /// skipped grading records the "N/A" placeholder and never blocks
    /// the submission.
    pub fn submit_batch(
        &mut self,
        input: SubmitBatchInput,
        grading: &GradingOutcome,
    ) -> AppResult<Uuid> {
        validate_species(&input.species).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_weight_kg(input.weight_kg).map_err(|e| AppError::Validation(e.to_string()))?;

        let now = Utc::now();
        let batch = HarvestBatch {
            id: Uuid::new_v4(),
            farmer_id: input.farmer_id,
            species: input.species,
            weight_kg: input.weight_kg,
            harvest_date: now.date_naive(),
            status: BatchStatus::Pending,
            quality_grade: Some(grading.grade_label()),
            price_per_kg: None,
            created_at: now,
        };

        let id = batch.id;
        tracing::info!(
            batch_id = %id,
            species = %batch.species,
            grade = batch.quality_grade.as_deref(),
            "Batch submitted"
        );
        self.batches.push(batch);
        Ok(id)
    }

    /// Farmer submission with creation-time grading: validates the
    /// harvest description, asks the Oracle for an analysis, and records
    /// the batch with whatever grade (or placeholder) came back.
    pub async fn submit_with_analysis(
        &mut self,
        input: SubmitBatchInput,
        description: &str,
        client: &GradingClient,
    ) -> AppResult<Uuid> {
        validate_harvest_description(description)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let grading = client.analyze_harvest(description).await;
        self.submit_batch(input, &grading)
    }

    /// Admin validation: a `Pending` batch becomes `Approved` and receives
    /// the default grade and price together.
    ///
    /// Returns `false` without mutating anything for an unknown or
    /// already-advanced batch, so bulk approvals are idempotent.
    pub fn approve_batch(&mut self, id: Uuid) -> bool {
        let Some(batch) = self
            .batches
            .iter_mut()
            .find(|b| b.id == id && b.status == BatchStatus::Pending)
        else {
            tracing::debug!(batch_id = %id, "Approval ignored: batch not pending");
            return false;
        };

        batch.status = BatchStatus::Approved;
        batch.quality_grade = Some(APPROVAL_DEFAULT_GRADE.to_string());
        batch.price_per_kg = Some(approval_default_price());
        tracing::info!(batch_id = %id, "Batch approved");
        true
    }

    /// Buyer transaction: an `Approved` batch becomes `Sold` and exactly
    /// one `Paid` order is appended for the full batch weight.
    ///
    /// Returns the new order id, or `None` (no order created, no batch
    /// mutated) when the batch is not purchasable.
    pub fn purchase_batch(&mut self, id: Uuid, buyer_id: &str) -> Option<Uuid> {
        let Some(batch) = self
            .batches
            .iter_mut()
            .find(|b| b.id == id && b.is_purchasable())
        else {
            tracing::debug!(batch_id = %id, "Purchase ignored: batch not approved");
            return None;
        };

        batch.status = BatchStatus::Sold;
        let order = Order {
            id: Uuid::new_v4(),
            batch_id: id,
            buyer_id: buyer_id.to_string(),
            amount_kg: batch.weight_kg,
            status: OrderStatus::Paid,
            date: Utc::now().date_naive(),
        };

        let order_id = order.id;
        tracing::info!(batch_id = %id, order_id = %order_id, buyer = buyer_id, "Batch sold");
        self.orders.push(order);
        Some(order_id)
    }

    /// Logistics advancement: move an order forward along
    /// `Pending -> Paid -> Shipped -> Delivered`.
    ///
    /// The target must rank strictly after the current status; skipping
    /// ahead is allowed, moving backward or restating the current status
    /// is a silent no-op.
    pub fn advance_order(&mut self, id: Uuid, target: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == id) else {
            tracing::debug!(order_id = %id, "Advancement ignored: unknown order");
            return false;
        };

        if !order.status.can_advance_to(target) {
            tracing::debug!(
                order_id = %id,
                from = %order.status,
                to = %target,
                "Advancement ignored: not a forward move"
            );
            return false;
        }

        order.status = target;
        tracing::info!(order_id = %id, status = %target, "Order advanced");
        true
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn batches(&self) -> &[HarvestBatch] {
        &self.batches
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn batch(&self, id: Uuid) -> Option<&HarvestBatch> {
        self.batches.iter().find(|b| b.id == id)
    }

    pub fn order(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Batches owned by one farmer, in insertion order
    pub fn batches_for_farmer(&self, farmer_id: &str) -> Vec<&HarvestBatch> {
        self.batches
            .iter()
            .filter(|b| b.farmer_id == farmer_id)
            .collect()
    }

    /// The buyer marketplace: batches currently open for purchase
    pub fn approved_batches(&self) -> Vec<&HarvestBatch> {
        self.batches.iter().filter(|b| b.is_purchasable()).collect()
    }

    /// The logistics queue: paid orders awaiting shipment
    pub fn paid_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.status == OrderStatus::Paid)
            .collect()
    }

    /// Seed the session with the demo fixture data: three batches in
    /// different lifecycle stages and one paid order against the sold one.
    pub fn seed_demo_data(&mut self) {
        let now = Utc::now();
        let date = |s: &str| s.parse().expect("valid fixture date");

        let pending = HarvestBatch {
            id: Uuid::new_v4(),
            farmer_id: "F1".to_string(),
            species: "Saccharina latissima".to_string(),
            weight_kg: Decimal::from(450),
            harvest_date: date("2024-03-01"),
            status: BatchStatus::Pending,
            quality_grade: None,
            price_per_kg: None,
            created_at: now,
        };
        let approved = HarvestBatch {
            id: Uuid::new_v4(),
            farmer_id: "F2".to_string(),
            species: "Palmaria palmata".to_string(),
            weight_kg: Decimal::from(200),
            harvest_date: date("2024-02-28"),
            status: BatchStatus::Approved,
            quality_grade: Some("A".to_string()),
            price_per_kg: Some(Decimal::from(15)),
            created_at: now,
        };
        let sold = HarvestBatch {
            id: Uuid::new_v4(),
            farmer_id: "F1".to_string(),
            species: "Porphyra umbilicalis".to_string(),
            weight_kg: Decimal::from(120),
            harvest_date: date("2024-03-05"),
            status: BatchStatus::Sold,
            quality_grade: Some("AAA".to_string()),
            price_per_kg: Some(Decimal::from(45)),
            created_at: now,
        };

        self.orders.push(Order {
            id: Uuid::new_v4(),
            batch_id: sold.id,
            buyer_id: "BUYER1".to_string(),
            amount_kg: sold.weight_kg,
            status: OrderStatus::Paid,
            date: date("2024-03-06"),
        });
        self.batches.extend([pending, approved, sold]);
    }
}
