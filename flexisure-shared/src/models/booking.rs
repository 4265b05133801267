use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monetary amount in the account's base currency unit.
pub type Amount = f64;

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Draft,
    Booked,
    Changed,
    Cancelled,
}

impl BookingStatus {
    /// Capitalised label for display
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Draft => "Draft",
            BookingStatus::Booked => "Booked",
            BookingStatus::Changed => "Changed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }
}

/// The single trip being configured or purchased in this session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub route: String,
    pub departure_date: String,
    pub departure_time: String,
    pub base_fare: Amount,
    pub taxes: Amount,
    pub assured_fee: Amount,
    pub has_assured_fee: bool,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        route: impl Into<String>,
        departure_date: impl Into<String>,
        departure_time: impl Into<String>,
        base_fare: Amount,
        taxes: Amount,
        assured_fee: Amount,
    ) -> Self {
        Self {
            id: format!("booking-{}", Uuid::new_v4().simple()),
            route: route.into(),
            departure_date: departure_date.into(),
            departure_time: departure_time.into(),
            base_fare,
            taxes,
            assured_fee,
            has_assured_fee: false,
            status: BookingStatus::Draft,
        }
    }

    /// The demo booking every session starts with
    pub fn seed() -> Self {
        Self {
            id: "booking-001".to_string(),
            route: "New York → Boston".to_string(),
            departure_date: "2024-12-15".to_string(),
            departure_time: "10:00 AM".to_string(),
            base_fare: 89.0,
            taxes: 15.0,
            assured_fee: 25.0,
            has_assured_fee: false,
            status: BookingStatus::Draft,
        }
    }

    /// Fare plus taxes
    pub fn total_without_fee(&self) -> Amount {
        self.base_fare + self.taxes
    }

    /// Fare plus taxes plus the protection add-on
    pub fn total_with_fee(&self) -> Amount {
        self.total_without_fee() + self.assured_fee
    }

    /// Amount currently payable, honouring the add-on flag
    pub fn current_total(&self) -> Amount {
        if self.has_assured_fee {
            self.total_with_fee()
        } else {
            self.total_without_fee()
        }
    }

    /// Copy of this booking marked as cancelled
    pub fn cancelled(&self) -> Self {
        Self {
            status: BookingStatus::Cancelled,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut booking = Booking::seed();
        assert_eq!(booking.total_without_fee(), 104.0);
        assert_eq!(booking.total_with_fee(), 129.0);
        assert_eq!(booking.current_total(), 104.0);

        booking.has_assured_fee = true;
        assert_eq!(booking.current_total(), 129.0);
    }

    #[test]
    fn test_totals_across_fares() {
        let cases = [
            (89.0, 15.0, 25.0),
            (0.0, 0.0, 0.0),
            (120.0, 30.5, 25.0),
            (49.99, 7.25, 12.5),
            (1250.0, 0.0, 99.95),
            (5.0, 2.0, 25.0),
        ];

        for (base_fare, taxes, assured_fee) in cases {
            let mut booking = Booking::new("A → B", "2025-01-01", "09:00 AM", base_fare, taxes, assured_fee);
            let without = base_fare + taxes;
            let with = without + assured_fee;

            assert_eq!(booking.total_without_fee(), without);
            assert_eq!(booking.total_with_fee(), with);
            assert_eq!(booking.current_total(), without);

            booking.has_assured_fee = true;
            assert_eq!(booking.total_without_fee(), without);
            assert_eq!(booking.total_with_fee(), with);
            assert_eq!(booking.current_total(), with);
        }
    }

    #[test]
    fn test_new_booking_is_unprotected_draft() {
        let booking = Booking::new("Paris → Rome", "2025-03-01", "08:15 AM", 120.0, 30.5, 25.0);

        assert!(booking.id.starts_with("booking-"));
        assert_eq!(booking.status, BookingStatus::Draft);
        assert!(!booking.has_assured_fee);
        assert_eq!(booking.total_without_fee(), 150.5);
    }

    #[test]
    fn test_cancelled_copy_keeps_fields() {
        let mut booking = Booking::seed();
        booking.has_assured_fee = true;

        let cancelled = booking.cancelled();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.id, booking.id);
        assert!(cancelled.has_assured_fee);
        assert_eq!(booking.status, BookingStatus::Draft);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Booking::seed()).unwrap();
        assert_eq!(json["baseFare"], 89.0);
        assert_eq!(json["hasAssuredFee"], false);
        assert_eq!(json["status"], "draft");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BookingStatus::Cancelled.label(), "Cancelled");
        assert_eq!(BookingStatus::Draft.label(), "Draft");
        assert!(BookingStatus::Cancelled.is_cancelled());
        assert!(!BookingStatus::Booked.is_cancelled());
    }
}
