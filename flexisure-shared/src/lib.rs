pub mod models;

pub use models::booking::{Amount, Booking, BookingStatus};
pub use models::preferences::{
    Currency, DateFormat, NotificationKind, NotificationSettings, NotificationsPatch, Preferences,
    PreferencesPatch, TimeFormat,
};
