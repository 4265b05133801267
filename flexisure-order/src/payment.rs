use std::sync::Arc;

use flexisure_core::{PaymentGateway, PaymentMethod, PaymentReceipt, PaymentRequest};
use flexisure_store::{Action, Store};
use serde::Serialize;
use tracing::{info, warn};

use crate::{active_booking, FlowError};

#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutcome {
    pub receipt: PaymentReceipt,
    /// Charged amount rendered with the active currency symbol
    pub display_total: String,
}

/// Charges the current booking and confirms it on success
pub struct PaymentFlow {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentFlow {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Pay the currently due total. On failure the error string is left in
    /// the store for display and the booking is untouched; calling again retries.
    pub async fn pay(&self, store: &mut Store, method: PaymentMethod) -> Result<PaymentOutcome, FlowError> {
        let booking = active_booking(store)?;

        let request = PaymentRequest {
            booking_id: booking.id.clone(),
            amount: booking.current_total(),
            currency: store.state().preferences.currency,
            method,
        };

        info!(
            "Processing payment of {} for booking {}",
            store.format_currency(request.amount),
            request.booking_id
        );

        store.dispatch(Action::ClearError);
        store.dispatch(Action::SetLoading(true));
        let result = self.gateway.charge(&request).await;
        store.dispatch(Action::SetLoading(false));

        match result {
            Ok(receipt) => {
                store.dispatch(Action::ConfirmBooking);
                info!("Payment {} succeeded for booking {}", receipt.id, receipt.booking_id);
                Ok(PaymentOutcome {
                    display_total: store.format_currency(receipt.amount),
                    receipt,
                })
            }
            Err(e) => {
                warn!("Payment failed for booking {}: {}", request.booking_id, e);
                store.dispatch(Action::SetError(Some(e.to_string())));
                Err(FlowError::Service(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexisure_core::{Outcome, SimulatedGateway};
    use flexisure_shared::BookingStatus;

    #[tokio::test]
    async fn test_payment_confirms_draft() {
        let flow = PaymentFlow::new(Arc::new(SimulatedGateway::instant(Outcome::AlwaysSucceed)));
        let mut store = Store::default();

        let outcome = flow.pay(&mut store, PaymentMethod::Card).await.unwrap();
        assert_eq!(outcome.receipt.amount, 104.0);
        assert_eq!(outcome.display_total, "$104");

        let state = store.state();
        assert_eq!(state.current_booking.as_ref().unwrap().status, BookingStatus::Booked);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_payment_failure_sets_error() {
        let flow = PaymentFlow::new(Arc::new(SimulatedGateway::instant(Outcome::AlwaysFail)));
        let mut store = Store::default();

        let err = flow.pay(&mut store, PaymentMethod::ApplePay).await.unwrap_err();
        assert!(err.is_retryable());

        let state = store.state();
        assert_eq!(state.current_booking.as_ref().unwrap().status, BookingStatus::Draft);
        assert!(!state.is_loading);
        assert!(state.error.as_deref().unwrap().contains("Network error"));
    }
}
