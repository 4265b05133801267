use std::sync::Arc;

use flexisure_core::{CancellationReceipt, CancellationService};
use flexisure_pricing::RefundQuote;
use flexisure_store::{Action, Store};
use serde::Serialize;
use tracing::{info, warn};

use crate::{active_booking, FlowError};

#[derive(Debug, Clone, Serialize)]
pub struct CancellationOutcome {
    pub receipt: CancellationReceipt,
    /// Refund as quoted before the booking was cancelled
    pub refund: RefundQuote,
}

impl CancellationOutcome {
    /// Confirmation text shown once the trip is cancelled
    pub fn summary(&self, store: &Store) -> String {
        format!(
            "Your booking has been cancelled.\n\nRefund: {}\nProcessing: {}",
            store.format_currency(self.refund.amount),
            self.refund.processing
        )
    }
}

/// Cancels the current booking through the cancellation service
pub struct CancellationFlow {
    service: Arc<dyn CancellationService>,
}

impl CancellationFlow {
    pub fn new(service: Arc<dyn CancellationService>) -> Self {
        Self { service }
    }

    pub async fn cancel(&self, store: &mut Store) -> Result<CancellationOutcome, FlowError> {
        let booking = active_booking(store)?;
        let refund = store.quote_refund();

        store.dispatch(Action::ClearError);
        store.dispatch(Action::SetLoading(true));
        let result = self.service.cancel(&booking.id).await;
        store.dispatch(Action::SetLoading(false));

        match result {
            Ok(receipt) => {
                store.dispatch(Action::CancelBooking);
                info!(
                    "Booking {} cancelled, refund {} over {}",
                    booking.id,
                    store.format_currency(refund.amount),
                    refund.processing
                );
                Ok(CancellationOutcome { receipt, refund })
            }
            Err(e) => {
                warn!("Cancellation failed for booking {}: {}", booking.id, e);
                store.dispatch(Action::SetError(Some(e.to_string())));
                Err(FlowError::Service(e))
            }
        }
    }
}
