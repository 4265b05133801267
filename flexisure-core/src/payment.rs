use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flexisure_shared::{Amount, Currency};
use serde::{Deserialize, Serialize};

use crate::CoreResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Card,
    ApplePay,
    GooglePay,
    Bank,
}

impl PaymentMethod {
    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::ApplePay => "apple-pay",
            PaymentMethod::GooglePay => "google-pay",
            PaymentMethod::Bank => "bank",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub booking_id: String,
    pub amount: Amount,
    pub currency: Currency,
    pub method: PaymentMethod,
}

/// Issued only for a settled charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String, // Provider's reference
    pub booking_id: String,
    pub amount: Amount,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the requested amount against the selected method
    async fn charge(&self, request: &PaymentRequest) -> CoreResult<PaymentReceipt>;
}
