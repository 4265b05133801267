use flexisure_shared::{Booking, BookingStatus, Preferences, PreferencesPatch};
use serde::{Deserialize, Serialize};

/// Everything the screens read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_booking: Option<Booking>,
    pub booking_history: Vec<Booking>,
    pub preferences: Preferences,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AppState {
    /// State with no active booking
    pub fn empty(preferences: Preferences) -> Self {
        Self {
            current_booking: None,
            booking_history: Vec::new(),
            preferences,
            is_loading: false,
            error: None,
        }
    }
}

impl Default for AppState {
    /// Session start: the demo booking and default preferences
    fn default() -> Self {
        Self {
            current_booking: Some(Booking::seed()),
            ..Self::empty(Preferences::default())
        }
    }
}

/// The closed set of state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetBooking(Booking),
    AddAssuredFee,
    RemoveAssuredFee,
    /// Draft → Booked once payment has gone through
    ConfirmBooking,
    CancelBooking,
    UpdatePreferences(PreferencesPatch),
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetBooking(_) => "SET_BOOKING",
            Action::AddAssuredFee => "ADD_ASSURED_FEE",
            Action::RemoveAssuredFee => "REMOVE_ASSURED_FEE",
            Action::ConfirmBooking => "CONFIRM_BOOKING",
            Action::CancelBooking => "CANCEL_BOOKING",
            Action::UpdatePreferences(_) => "UPDATE_PREFERENCES",
            Action::SetLoading(_) => "SET_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::ClearError => "CLEAR_ERROR",
        }
    }
}

/// Pure transition function. Booking actions without a current booking
/// return the state unchanged.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::SetBooking(booking) => AppState {
            current_booking: Some(booking),
            ..state.clone()
        },
        Action::AddAssuredFee => with_booking(state, |b| b.has_assured_fee = true),
        Action::RemoveAssuredFee => with_booking(state, |b| b.has_assured_fee = false),
        Action::ConfirmBooking => with_booking(state, |b| {
            if b.status == BookingStatus::Draft {
                b.status = BookingStatus::Booked;
            }
        }),
        Action::CancelBooking => match &state.current_booking {
            Some(booking) => {
                let cancelled = booking.cancelled();
                let mut next = state.clone();
                next.booking_history.push(cancelled.clone());
                next.current_booking = Some(cancelled);
                next
            }
            None => state.clone(),
        },
        Action::UpdatePreferences(patch) => AppState {
            preferences: state.preferences.merged(&patch),
            ..state.clone()
        },
        Action::SetLoading(is_loading) => AppState {
            is_loading,
            ..state.clone()
        },
        Action::SetError(error) => AppState {
            error,
            ..state.clone()
        },
        Action::ClearError => AppState {
            error: None,
            ..state.clone()
        },
    }
}

fn with_booking(state: &AppState, patch: impl FnOnce(&mut Booking)) -> AppState {
    let mut next = state.clone();
    if let Some(booking) = next.current_booking.as_mut() {
        patch(booking);
    }
    next
}
