pub mod payment;
pub mod cancellation;

pub use cancellation::{CancellationFlow, CancellationOutcome};
pub use payment::{PaymentFlow, PaymentOutcome};

use flexisure_core::CoreError;
use flexisure_shared::Booking;
use flexisure_store::Store;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("No active booking")]
    NoBooking,

    #[error("Booking already cancelled: {0}")]
    AlreadyCancelled(String),

    #[error(transparent)]
    Service(#[from] CoreError),
}

impl FlowError {
    /// Whether invoking the same flow again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FlowError::Service(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Current booking, provided it can still be acted on
fn active_booking(store: &Store) -> Result<Booking, FlowError> {
    let booking = store
        .state()
        .current_booking
        .clone()
        .ok_or(FlowError::NoBooking)?;

    if booking.status.is_cancelled() {
        return Err(FlowError::AlreadyCancelled(booking.id));
    }
    Ok(booking)
}
