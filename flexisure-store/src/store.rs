use flexisure_pricing::{format_currency, format_date, PricingEngine, Refund, RefundQuote};
use flexisure_shared::{Amount, NotificationKind, PreferencesPatch};
use tracing::debug;

use crate::app_config::Config;
use crate::state::{reduce, Action, AppState};

/// Owns the session state; all mutations go through [`Store::dispatch`].
///
/// Constructed by the composition root and passed by reference to whatever
/// drives it, so every test can start from a fresh instance.
pub struct Store {
    state: AppState,
    pricing: PricingEngine,
}

impl Store {
    pub fn new(state: AppState, pricing: PricingEngine) -> Self {
        Self { state, pricing }
    }

    /// Session-start state with the demo booking
    pub fn seeded(pricing: PricingEngine) -> Self {
        Self::new(AppState::default(), pricing)
    }

    pub fn from_config(config: &Config) -> Self {
        let state = AppState {
            preferences: config.preferences.clone(),
            ..AppState::default()
        };
        Self::new(state, PricingEngine::new(config.pricing.clone()))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        self.state = reduce(&self.state, action);
        debug!(
            action = name,
            booking_status = ?self.state.current_booking.as_ref().map(|b| b.status),
            history = self.state.booking_history.len(),
            "dispatched"
        );
    }

    pub fn format_currency(&self, amount: Amount) -> String {
        format_currency(amount, &self.state.preferences)
    }

    pub fn format_date(&self, date: &str) -> String {
        format_date(date, &self.state.preferences)
    }

    pub fn calculate_refund(&self) -> Refund {
        self.pricing
            .calculate_refund(self.state.current_booking.as_ref(), &self.state.preferences)
    }

    pub fn quote_refund(&self) -> RefundQuote {
        self.pricing
            .quote_refund(self.state.current_booking.as_ref(), &self.state.preferences)
    }

    /// Flip one notification flag
    pub fn toggle_notification(&mut self, kind: NotificationKind) {
        let patch = self.state.preferences.notifications.toggle(kind);
        self.dispatch(Action::UpdatePreferences(PreferencesPatch::notifications(patch)));
    }

    /// JSON snapshot of the current state
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.state).unwrap_or(serde_json::Value::Null)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded(PricingEngine::default())
    }
}
