//! Batch and order lifecycle tests
//!
//! Covers the correctness properties of the four session operations:
//! - Batch status only ever moves forward along PENDING -> APPROVED ->
//!   SOLD -> SHIPPED
//! - Purchasing a non-approved batch mutates nothing and creates no order
//! - Every successful purchase creates exactly one order mirroring the
//!   batch weight
//! - Approval is idempotent and assigns grade and price together
//! - Order advancement is forward-only, skipping allowed

use proptest::prelude::*;
use rust_decimal::Decimal;
use seaweed_trade_core::external::GradingOutcome;
use seaweed_trade_core::session::{SubmitBatchInput, TradeSession};
use shared::{BatchStatus, OrderStatus};
use uuid::Uuid;

fn kelp_input(weight: i64) -> SubmitBatchInput {
    SubmitBatchInput {
        farmer_id: "F1".to_string(),
        species: "Kelp".to_string(),
        weight_kg: Decimal::from(weight),
    }
}

/// Submit a batch with grading unavailable and return its id
fn submit(session: &mut TradeSession, weight: i64) -> Uuid {
    session
        .submit_batch(kelp_input(weight), &GradingOutcome::skipped())
        .expect("valid input")
}

mod submission {
    use super::*;

    #[test]
    fn batch_created_pending_with_placeholder_grade() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 500);

        let batch = session.batch(id).unwrap();
        assert_eq!(batch.status, BatchStatus::Pending);
        assert_eq!(batch.quality_grade.as_deref(), Some("N/A"));
        assert_eq!(batch.weight_kg, Decimal::from(500));
        assert!(batch.price_per_kg.is_none());
    }

    #[test]
    fn empty_species_rejected() {
        let mut session = TradeSession::new();
        let result = session.submit_batch(
            SubmitBatchInput {
                farmer_id: "F1".to_string(),
                species: "   ".to_string(),
                weight_kg: Decimal::from(10),
            },
            &GradingOutcome::skipped(),
        );
        assert!(result.is_err());
        assert!(session.batches().is_empty());
    }

    #[test]
    fn non_positive_weight_rejected() {
        let mut session = TradeSession::new();
        for weight in [Decimal::ZERO, Decimal::from(-5)] {
            let result = session.submit_batch(
                SubmitBatchInput {
                    farmer_id: "F1".to_string(),
                    species: "Kelp".to_string(),
                    weight_kg: weight,
                },
                &GradingOutcome::skipped(),
            );
            assert!(result.is_err());
        }
        assert!(session.batches().is_empty());
    }

    #[test]
    fn batches_appended_in_insertion_order() {
        let mut session = TradeSession::new();
        let first = submit(&mut session, 100);
        let second = submit(&mut session, 200);

        let ids: Vec<Uuid> = session.batches().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first, second]);
    }
}

mod approval {
    use super::*;

    #[test]
    fn approval_assigns_grade_and_price_together() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 300);

        assert!(session.approve_batch(id));

        let batch = session.batch(id).unwrap();
        assert_eq!(batch.status, BatchStatus::Approved);
        assert!(batch.quality_grade.is_some());
        assert!(batch.price_per_kg.is_some());
    }

    #[test]
    fn approval_is_idempotent() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 300);

        assert!(session.approve_batch(id));
        let snapshot = session.batch(id).unwrap().clone();

        // Second call is a no-op with identical observable effect
        assert!(!session.approve_batch(id));
        let after = session.batch(id).unwrap();
        assert_eq!(after.status, snapshot.status);
        assert_eq!(after.quality_grade, snapshot.quality_grade);
        assert_eq!(after.price_per_kg, snapshot.price_per_kg);
    }

    #[test]
    fn approving_unknown_batch_is_noop() {
        let mut session = TradeSession::new();
        submit(&mut session, 300);

        assert!(!session.approve_batch(Uuid::new_v4()));
        assert_eq!(session.batches()[0].status, BatchStatus::Pending);
    }

    #[test]
    fn approving_sold_batch_is_noop() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 300);
        session.approve_batch(id);
        session.purchase_batch(id, "BUYER1").unwrap();

        assert!(!session.approve_batch(id));
        assert_eq!(session.batch(id).unwrap().status, BatchStatus::Sold);
    }
}

mod purchase {
    use super::*;

    #[test]
    fn purchase_sells_batch_and_creates_paid_order() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 200);
        session.approve_batch(id);

        let order_id = session.purchase_batch(id, "U1").expect("purchasable");

        assert_eq!(session.batch(id).unwrap().status, BatchStatus::Sold);
        assert_eq!(session.orders().len(), 1);

        let order = session.order(order_id).unwrap();
        assert_eq!(order.batch_id, id);
        assert_eq!(order.buyer_id, "U1");
        assert_eq!(order.amount_kg, Decimal::from(200));
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn purchasing_pending_batch_changes_nothing() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 200);

        assert!(session.purchase_batch(id, "U1").is_none());
        assert!(session.orders().is_empty());
        assert_eq!(session.batch(id).unwrap().status, BatchStatus::Pending);
    }

    #[test]
    fn double_purchase_creates_exactly_one_order() {
        let mut session = TradeSession::new();
        let id = submit(&mut session, 200);
        session.approve_batch(id);

        assert!(session.purchase_batch(id, "U1").is_some());
        assert!(session.purchase_batch(id, "U2").is_none());
        assert_eq!(session.orders().len(), 1);
        assert_eq!(session.orders()[0].buyer_id, "U1");
    }

    #[test]
    fn purchasing_unknown_batch_changes_nothing() {
        let mut session = TradeSession::new();
        submit(&mut session, 200);

        assert!(session.purchase_batch(Uuid::new_v4(), "U1").is_none());
        assert!(session.orders().is_empty());
    }
}

mod shipment {
    use super::*;

    fn paid_order(session: &mut TradeSession) -> Uuid {
        let id = submit(session, 150);
        session.approve_batch(id);
        session.purchase_batch(id, "BUYER1").unwrap()
    }

    #[test]
    fn paid_order_ships() {
        let mut session = TradeSession::new();
        let order_id = paid_order(&mut session);

        assert!(session.advance_order(order_id, OrderStatus::Shipped));
        assert_eq!(
            session.order(order_id).unwrap().status,
            OrderStatus::Shipped
        );
    }

    #[test]
    fn skipping_ahead_is_allowed() {
        let mut session = TradeSession::new();
        let order_id = paid_order(&mut session);

        assert!(session.advance_order(order_id, OrderStatus::Delivered));
        assert_eq!(
            session.order(order_id).unwrap().status,
            OrderStatus::Delivered
        );
    }

    #[test]
    fn backward_and_same_state_moves_rejected() {
        let mut session = TradeSession::new();
        let order_id = paid_order(&mut session);
        session.advance_order(order_id, OrderStatus::Shipped);

        assert!(!session.advance_order(order_id, OrderStatus::Paid));
        assert!(!session.advance_order(order_id, OrderStatus::Shipped));
        assert_eq!(
            session.order(order_id).unwrap().status,
            OrderStatus::Shipped
        );
    }

    #[test]
    fn unknown_order_is_noop() {
        let mut session = TradeSession::new();
        paid_order(&mut session);

        assert!(!session.advance_order(Uuid::new_v4(), OrderStatus::Shipped));
    }

    #[test]
    fn paid_orders_queue_tracks_status() {
        let mut session = TradeSession::new();
        let order_id = paid_order(&mut session);
        assert_eq!(session.paid_orders().len(), 1);

        session.advance_order(order_id, OrderStatus::Shipped);
        assert!(session.paid_orders().is_empty());
    }
}

// ============================================================================
// Property: batch status never moves backward under any operation sequence
// ============================================================================

/// One randomly chosen session operation
#[derive(Debug, Clone)]
enum Op {
    Approve(usize),
    Purchase(usize),
    Advance(usize, OrderStatus),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let status = prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Paid),
        Just(OrderStatus::Shipped),
        Just(OrderStatus::Delivered),
    ];
    prop_oneof![
        (0..8usize).prop_map(Op::Approve),
        (0..8usize).prop_map(Op::Purchase),
        (0..8usize, status).prop_map(|(i, s)| Op::Advance(i, s)),
    ]
}

proptest! {
    #[test]
    fn batch_status_is_monotonic(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut session = TradeSession::new();
        for weight in [100, 250, 400] {
            let id = session
                .submit_batch(
                    SubmitBatchInput {
                        farmer_id: "F1".to_string(),
                        species: "Kelp".to_string(),
                        weight_kg: Decimal::from(weight),
                    },
                    &GradingOutcome::skipped(),
                )
                .unwrap();
            // Leave one batch pending, advance the others partway
            if weight > 100 {
                session.approve_batch(id);
            }
        }

        for op in ops {
            let batch_ranks: Vec<u8> = session.batches().iter().map(|b| b.status.rank()).collect();
            let order_ranks: Vec<u8> = session.orders().iter().map(|o| o.status.rank()).collect();

            match op {
                Op::Approve(i) => {
                    if let Some(id) = session.batches().get(i).map(|b| b.id) {
                        session.approve_batch(id);
                    }
                }
                Op::Purchase(i) => {
                    if let Some(id) = session.batches().get(i).map(|b| b.id) {
                        session.purchase_batch(id, "BUYER1");
                    }
                }
                Op::Advance(i, target) => {
                    if let Some(id) = session.orders().get(i).map(|o| o.id) {
                        session.advance_order(id, target);
                    }
                }
            }

            for (before, batch) in batch_ranks.iter().zip(session.batches()) {
                prop_assert!(
                    batch.status.rank() >= *before,
                    "batch status moved backward"
                );
            }
            for (before, order) in order_ranks.iter().zip(session.orders()) {
                prop_assert!(
                    order.status.rank() >= *before,
                    "order status moved backward"
                );
            }
            // Orders only ever come from purchases, one per sold batch
            let sold_or_shipped = session
                .batches()
                .iter()
                .filter(|b| b.status.rank() >= BatchStatus::Sold.rank())
                .count();
            prop_assert_eq!(session.orders().len(), sold_or_shipped);
        }
    }
}
