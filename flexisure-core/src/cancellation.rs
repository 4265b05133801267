use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationReceipt {
    pub id: String,
    pub booking_id: String,
    pub cancelled_at: DateTime<Utc>,
}

#[async_trait]
pub trait CancellationService: Send + Sync {
    /// Ask the provider to cancel the booking
    async fn cancel(&self, booking_id: &str) -> CoreResult<CancellationReceipt>;
}
