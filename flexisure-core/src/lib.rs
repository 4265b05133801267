pub mod payment;
pub mod cancellation;
pub mod simulated;

pub use cancellation::{CancellationReceipt, CancellationService};
pub use payment::{PaymentGateway, PaymentMethod, PaymentReceipt, PaymentRequest};
pub use simulated::{Outcome, SimulatedGateway, SimulationConfig};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    /// Recoverable failure; the caller may retry the same operation.
    #[error("Transient service failure: {0}")]
    Transient(String),
}

impl CoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Transient(_))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
