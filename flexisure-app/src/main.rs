use std::sync::Arc;

use anyhow::Context;
use flexisure_core::{PaymentMethod, SimulatedGateway};
use flexisure_order::{CancellationFlow, FlowError, PaymentFlow};
use flexisure_store::{Action, Config, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Times the demo presses "Retry" before giving up
const MAX_ATTEMPTS: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flexisure_app=debug,flexisure_store=debug,flexisure_order=debug,flexisure_core=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let mut store = Store::from_config(&config);

    let gateway = Arc::new(SimulatedGateway::new(&config.simulation));
    let payment = PaymentFlow::new(gateway.clone());
    let cancellation = CancellationFlow::new(gateway);

    if let Some(booking) = store.state().current_booking.as_ref() {
        tracing::info!(
            "Booking {} {} on {} at {}: subtotal {}",
            booking.id,
            booking.route,
            store.format_date(&booking.departure_date),
            booking.departure_time,
            store.format_currency(booking.current_total())
        );
    }

    store.dispatch(Action::AddAssuredFee);

    let mut attempt = 1;
    let paid = loop {
        match payment.pay(&mut store, PaymentMethod::Card).await {
            Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                tracing::warn!("Payment attempt {} failed: {}, retrying", attempt, e);
                attempt += 1;
            }
            other => break other,
        }
    };
    let paid = paid.context("Payment did not go through")?;
    tracing::info!("Paid {} (receipt {})", paid.display_total, paid.receipt.id);

    let refund = store.calculate_refund();
    tracing::info!("If cancelled now: {} ({})", store.format_currency(refund.amount), refund.breakdown);

    let mut attempt = 1;
    let cancelled = loop {
        match cancellation.cancel(&mut store).await {
            Err(FlowError::Service(e)) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                tracing::warn!("Cancellation attempt {} failed: {}, retrying", attempt, e);
                attempt += 1;
            }
            other => break other,
        }
    };
    let cancelled = cancelled.context("Cancellation did not go through")?;
    println!("{}", cancelled.summary(&store));

    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
    Ok(())
}
