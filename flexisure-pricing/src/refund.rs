use std::fmt;

use flexisure_shared::{Amount, Booking, Preferences};
use serde::{Deserialize, Serialize};

use crate::format::format_currency;

/// Refund estimate window, in business days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingWindow {
    pub min_days: u32,
    pub max_days: u32,
}

impl fmt::Display for ProcessingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} business days", self.min_days, self.max_days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Deducted from unprotected refunds
    pub cancellation_fee: Amount,
    /// Refund window when the assured fee was purchased
    pub protected_processing: ProcessingWindow,
    /// Refund window under the standard policy
    pub standard_processing: ProcessingWindow,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cancellation_fee: 15.0,
            protected_processing: ProcessingWindow { min_days: 3, max_days: 5 },
            standard_processing: ProcessingWindow { min_days: 5, max_days: 7 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Refund {
    pub amount: Amount,
    pub breakdown: String,
}

/// Cancellation-screen view of a refund
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefundQuote {
    pub original_fare: Amount,
    pub taxes: Amount,
    pub cancellation_fee: Amount,
    /// Non-refundable add-on, zero when not purchased
    pub assured_fee: Amount,
    pub amount: Amount,
    pub breakdown: String,
    pub processing: ProcessingWindow,
    /// What protection saved compared to the standard policy
    pub saved_amount: Option<Amount>,
}

/// Derives refund figures from a booking
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Refund payable if the booking were cancelled now.
    ///
    /// Protected bookings get fare and taxes back, the assured fee itself is kept.
    /// Unprotected bookings lose the cancellation fee. Without a booking the
    /// refund is zero.
    pub fn calculate_refund(&self, booking: Option<&Booking>, preferences: &Preferences) -> Refund {
        let Some(booking) = booking else {
            return Refund {
                amount: 0.0,
                breakdown: "No booking found".to_string(),
            };
        };

        let amount = self.refund_amount(booking, booking.has_assured_fee);
        let fare = format_currency(booking.base_fare, preferences);
        let taxes = format_currency(booking.taxes, preferences);

        let breakdown = if booking.has_assured_fee {
            format!("Full refund of fare ({}) + taxes ({})", fare, taxes)
        } else {
            format!(
                "Fare ({}) + taxes ({}) - cancellation fee ({})",
                fare,
                taxes,
                format_currency(self.config.cancellation_fee, preferences)
            )
        };

        Refund { amount, breakdown }
    }

    /// Detailed quote built on the same two branches as [`Self::calculate_refund`]
    pub fn quote_refund(&self, booking: Option<&Booking>, preferences: &Preferences) -> RefundQuote {
        let refund = self.calculate_refund(booking, preferences);

        let Some(booking) = booking else {
            return RefundQuote {
                original_fare: 0.0,
                taxes: 0.0,
                cancellation_fee: 0.0,
                assured_fee: 0.0,
                amount: refund.amount,
                breakdown: refund.breakdown,
                processing: self.config.standard_processing,
                saved_amount: None,
            };
        };

        if booking.has_assured_fee {
            let saved = refund.amount - self.refund_amount(booking, false);
            RefundQuote {
                original_fare: booking.base_fare,
                taxes: booking.taxes,
                cancellation_fee: 0.0,
                assured_fee: booking.assured_fee,
                amount: refund.amount,
                breakdown: refund.breakdown,
                processing: self.config.protected_processing,
                saved_amount: Some(saved),
            }
        } else {
            RefundQuote {
                original_fare: booking.base_fare,
                taxes: booking.taxes,
                cancellation_fee: self.config.cancellation_fee,
                assured_fee: 0.0,
                amount: refund.amount,
                breakdown: refund.breakdown,
                processing: self.config.standard_processing,
                saved_amount: None,
            }
        }
    }

    fn refund_amount(&self, booking: &Booking, protected: bool) -> Amount {
        if protected {
            booking.total_without_fee()
        } else {
            // Not floored: a fare below the fee yields a negative figure
            booking.total_without_fee() - self.config.cancellation_fee
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexisure_shared::Currency;

    fn protected_seed() -> Booking {
        Booking {
            has_assured_fee: true,
            ..Booking::seed()
        }
    }

    #[test]
    fn test_protected_refund_excludes_assured_fee() {
        let engine = PricingEngine::default();
        let refund = engine.calculate_refund(Some(&protected_seed()), &Preferences::default());

        assert_eq!(refund.amount, 104.0);
        assert_eq!(refund.breakdown, "Full refund of fare ($89) + taxes ($15)");
    }

    #[test]
    fn test_unprotected_refund_deducts_fee() {
        let engine = PricingEngine::default();
        let refund = engine.calculate_refund(Some(&Booking::seed()), &Preferences::default());

        assert_eq!(refund.amount, 89.0);
        assert_eq!(
            refund.breakdown,
            "Fare ($89) + taxes ($15) - cancellation fee ($15)"
        );
    }

    #[test]
    fn test_no_booking() {
        let engine = PricingEngine::default();
        let refund = engine.calculate_refund(None, &Preferences::default());

        assert_eq!(refund.amount, 0.0);
        assert_eq!(refund.breakdown, "No booking found");

        let quote = engine.quote_refund(None, &Preferences::default());
        assert_eq!(quote.amount, 0.0);
        assert_eq!(quote.processing.to_string(), "5-7 business days");
        assert_eq!(quote.saved_amount, None);
    }

    #[test]
    fn test_breakdown_uses_preferred_symbol() {
        let engine = PricingEngine::default();
        let prefs = Preferences {
            currency: Currency::Gbp,
            ..Preferences::default()
        };
        let refund = engine.calculate_refund(Some(&protected_seed()), &prefs);

        assert_eq!(refund.amount, 104.0);
        assert_eq!(refund.breakdown, "Full refund of fare (£89) + taxes (£15)");
    }

    #[test]
    fn test_quote_matches_refund_branches() {
        let engine = PricingEngine::default();
        let prefs = Preferences::default();

        let protected = engine.quote_refund(Some(&protected_seed()), &prefs);
        assert_eq!(protected.amount, 104.0);
        assert_eq!(protected.assured_fee, 25.0);
        assert_eq!(protected.cancellation_fee, 0.0);
        assert_eq!(protected.processing.to_string(), "3-5 business days");
        assert_eq!(protected.saved_amount, Some(15.0));

        let standard = engine.quote_refund(Some(&Booking::seed()), &prefs);
        assert_eq!(standard.amount, 89.0);
        assert_eq!(standard.assured_fee, 0.0);
        assert_eq!(standard.cancellation_fee, 15.0);
        assert_eq!(standard.processing.to_string(), "5-7 business days");
        assert_eq!(standard.saved_amount, None);
    }

    #[test]
    fn test_cheap_fare_refund_is_not_floored() {
        let engine = PricingEngine::default();
        let booking = Booking::new("A → B", "2025-01-01", "09:00 AM", 5.0, 2.0, 25.0);

        let refund = engine.calculate_refund(Some(&booking), &Preferences::default());
        assert_eq!(refund.amount, 5.0 + 2.0 - 15.0);
        assert_eq!(refund.breakdown, "Fare ($5) + taxes ($2) - cancellation fee ($15)");

        let protected = Booking {
            has_assured_fee: true,
            ..booking
        };
        let quote = engine.quote_refund(Some(&protected), &Preferences::default());
        assert_eq!(quote.amount, 7.0);
        assert_eq!(quote.saved_amount, Some(15.0));
    }

    #[test]
    fn test_custom_fee() {
        let engine = PricingEngine::new(PricingConfig {
            cancellation_fee: 20.0,
            ..PricingConfig::default()
        });
        let refund = engine.calculate_refund(Some(&Booking::seed()), &Preferences::default());

        assert_eq!(refund.amount, 84.0);
        assert!(refund.breakdown.ends_with("cancellation fee ($20)"));
    }

    #[test]
    fn test_quote_serializes() {
        let engine = PricingEngine::default();
        let quote = engine.quote_refund(Some(&protected_seed()), &Preferences::default());
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["amount"], 104.0);
        assert_eq!(json["processing"]["min_days"], 3);
    }
}
