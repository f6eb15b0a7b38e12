//! Seaweed Trade Platform - Demo Session
//!
//! Seeds the fixture data and walks one full trade lifecycle: a farmer
//! submits a graded batch, an admin approves it, a buyer purchases it,
//! and logistics advances the resulting order. Runs with or without an
//! Oracle credential; without one, grading falls back to "N/A".

use rust_decimal::Decimal;
use seaweed_trade_core::external::GradingClient;
use seaweed_trade_core::session::SubmitBatchInput;
use seaweed_trade_core::{Config, TradeSession};
use shared::{OrderStatus, UserRole};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swt_demo=debug,seaweed_trade_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Seaweed Trade demo session");
    tracing::info!("Environment: {}", config.environment);

    let client = GradingClient::new(&config.oracle);
    if !client.is_configured() {
        tracing::info!("No Oracle credential present; grading will fall back to N/A");
    }

    let mut session = TradeSession::new();
    session.seed_demo_data();
    tracing::info!(
        batches = session.batches().len(),
        orders = session.orders().len(),
        "Fixture data seeded"
    );

    // Farmer submits a new harvest, graded by the Oracle when available
    tracing::info!(role = %UserRole::Farmer, "Submitting new harvest batch");
    let batch_id = session
        .submit_with_analysis(
            SubmitBatchInput {
                farmer_id: "F1".to_string(),
                species: "Kelp".to_string(),
                weight_kg: Decimal::from(500),
            },
            "Firm, dark green blades with low epiphyte coverage",
            &client,
        )
        .await?;

    // Admin reviews the pending queue and approves the submission
    tracing::info!(role = %UserRole::Admin, "Approving batch");
    session.approve_batch(batch_id);

    // Buyer purchases from the marketplace
    tracing::info!(
        role = %UserRole::Buyer,
        available = session.approved_batches().len(),
        "Purchasing batch"
    );
    let order_id = session
        .purchase_batch(batch_id, "BUYER1")
        .ok_or_else(|| anyhow::anyhow!("batch was not purchasable"))?;

    // Logistics ships the paid order
    tracing::info!(
        role = %UserRole::Logistics,
        queue = session.paid_orders().len(),
        "Advancing order"
    );
    session.advance_order(order_id, OrderStatus::Shipped);

    // Admin pulls the market overview for the dashboard
    let overview = client.market_overview().await;
    tracing::info!("Market overview: {}", overview);

    for batch in session.batches() {
        tracing::info!(
            id = %batch.id,
            species = %batch.species,
            status = %batch.status,
            grade = batch.quality_grade.as_deref(),
            "Final batch state"
        );
    }
    for order in session.orders() {
        tracing::info!(
            id = %order.id,
            batch_id = %order.batch_id,
            status = %order.status,
            amount_kg = %order.amount_kg,
            "Final order state"
        );
    }

    Ok(())
}
