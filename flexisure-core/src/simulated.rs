use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use uuid::Uuid;

use crate::cancellation::{CancellationReceipt, CancellationService};
use crate::payment::{PaymentGateway, PaymentReceipt, PaymentRequest};
use crate::{CoreError, CoreResult};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub payment_delay_ms: u64,
    pub cancellation_delay_ms: u64,
    /// Probability in [0, 1] that a call fails
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            payment_delay_ms: 3000,
            cancellation_delay_ms: 2500,
            failure_rate: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Failure rate clamped to [0, 1]; NaN or infinite values fall back to the default.
    pub fn effective_failure_rate(&self) -> f64 {
        if self.failure_rate.is_finite() {
            self.failure_rate.clamp(0.0, 1.0)
        } else {
            let fallback = Self::default().failure_rate;
            tracing::warn!(
                "Ignoring non-finite failure_rate {}, using {}",
                self.failure_rate,
                fallback
            );
            fallback
        }
    }
}

/// Decides whether the next simulated call succeeds
#[derive(Debug)]
pub enum Outcome {
    AlwaysSucceed,
    AlwaysFail,
    FailureRate(f64),
    /// Fixed sequence of results; succeeds once exhausted
    Scripted(Mutex<VecDeque<bool>>),
}

impl Outcome {
    pub fn scripted(results: impl IntoIterator<Item = bool>) -> Self {
        Outcome::Scripted(Mutex::new(results.into_iter().collect()))
    }

    fn next_succeeds(&self) -> bool {
        match self {
            Outcome::AlwaysSucceed => true,
            Outcome::AlwaysFail => false,
            Outcome::FailureRate(rate) => rand::thread_rng().gen::<f64>() >= *rate,
            Outcome::Scripted(queue) => match queue.lock() {
                Ok(mut q) => q.pop_front().unwrap_or(true),
                Err(poisoned) => poisoned.into_inner().pop_front().unwrap_or(true),
            },
        }
    }
}

/// Stand-in for the payment provider and the cancellation backend
pub struct SimulatedGateway {
    payment_delay: Duration,
    cancellation_delay: Duration,
    outcome: Outcome,
}

impl SimulatedGateway {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            payment_delay: Duration::from_millis(config.payment_delay_ms),
            cancellation_delay: Duration::from_millis(config.cancellation_delay_ms),
            outcome: Outcome::FailureRate(config.effective_failure_rate()),
        }
    }

    /// Zero-latency gateway with a fixed outcome policy
    pub fn instant(outcome: Outcome) -> Self {
        Self {
            payment_delay: Duration::ZERO,
            cancellation_delay: Duration::ZERO,
            outcome,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> CoreResult<PaymentReceipt> {
        if request.amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "negative charge amount {}",
                request.amount
            )));
        }

        tokio::time::sleep(self.payment_delay).await;

        if !self.outcome.next_succeeds() {
            tracing::warn!("Simulated payment failure for booking {}", request.booking_id);
            return Err(CoreError::Transient("Network error".to_string()));
        }

        tracing::info!(
            "Simulated charge of {} {} for booking {} via {}",
            request.amount,
            request.currency.code(),
            request.booking_id,
            request.method.id()
        );

        Ok(PaymentReceipt {
            id: format!("sim_pay_{}", Uuid::new_v4().simple()),
            booking_id: request.booking_id.clone(),
            amount: request.amount,
            currency: request.currency,
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl CancellationService for SimulatedGateway {
    async fn cancel(&self, booking_id: &str) -> CoreResult<CancellationReceipt> {
        tokio::time::sleep(self.cancellation_delay).await;

        if !self.outcome.next_succeeds() {
            tracing::warn!("Simulated cancellation failure for booking {}", booking_id);
            return Err(CoreError::Transient("Network error".to_string()));
        }

        Ok(CancellationReceipt {
            id: format!("sim_cxl_{}", Uuid::new_v4().simple()),
            booking_id: booking_id.to_string(),
            cancelled_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentMethod;
    use flexisure_shared::Currency;

    fn request(amount: f64) -> PaymentRequest {
        PaymentRequest {
            booking_id: "booking-001".to_string(),
            amount,
            currency: Currency::Usd,
            method: PaymentMethod::Card,
        }
    }

    #[tokio::test]
    async fn test_scripted_outcomes_in_order() {
        let gateway = SimulatedGateway::instant(Outcome::scripted([false, true]));

        let first = gateway.charge(&request(104.0)).await;
        assert_eq!(first.unwrap_err(), CoreError::Transient("Network error".to_string()));

        let second = gateway.charge(&request(104.0)).await.unwrap();
        assert!(second.id.starts_with("sim_pay_"));
        assert_eq!(second.amount, 104.0);

        // Exhausted script falls back to success
        assert!(gateway.cancel("booking-001").await.is_ok());
    }

    #[tokio::test]
    async fn test_always_fail_is_retryable() {
        let gateway = SimulatedGateway::instant(Outcome::AlwaysFail);
        let err = gateway.cancel("booking-001").await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let gateway = SimulatedGateway::instant(Outcome::AlwaysSucceed);
        let err = gateway.charge(&request(-1.0)).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_failure_rate_extremes() {
        let never = SimulatedGateway::instant(Outcome::FailureRate(0.0));
        let always = SimulatedGateway::instant(Outcome::FailureRate(1.0));
        for _ in 0..20 {
            assert!(never.cancel("b").await.is_ok());
            assert!(always.cancel("b").await.is_err());
        }
    }

    #[test]
    fn test_failure_rate_sanitised() {
        let rate = |failure_rate: f64| {
            SimulationConfig {
                failure_rate,
                ..SimulationConfig::default()
            }
            .effective_failure_rate()
        };

        assert_eq!(rate(0.25), 0.25);
        assert_eq!(rate(-3.0), 0.0);
        assert_eq!(rate(7.0), 1.0);
        assert_eq!(rate(f64::NAN), 0.1);
        assert_eq!(rate(f64::INFINITY), 0.1);
    }

    #[tokio::test]
    async fn test_nan_rate_does_not_fail_every_call() {
        let config = SimulationConfig {
            payment_delay_ms: 0,
            cancellation_delay_ms: 0,
            failure_rate: f64::NAN,
        };
        let gateway = SimulatedGateway::new(&config);

        let mut successes = 0;
        for _ in 0..50 {
            if gateway.cancel("booking-001").await.is_ok() {
                successes += 1;
            }
        }
        assert!(successes > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_delay_is_applied() {
        let config = SimulationConfig {
            payment_delay_ms: 3000,
            cancellation_delay_ms: 2500,
            failure_rate: 0.0,
        };
        let gateway = SimulatedGateway::new(&config);

        let started = tokio::time::Instant::now();
        gateway.charge(&request(10.0)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }
}
