use serde::{Deserialize, Serialize};

/// Display currency. Selects a symbol only; amounts are never converted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthFirst,
    #[serde(rename = "DD/MM/YYYY")]
    DayFirst,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BookingConfirmations,
    TripReminders,
    PriceAlerts,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    #[serde(alias = "bookingconfirmations")]
    pub booking_confirmations: bool,
    #[serde(alias = "tripreminders")]
    pub trip_reminders: bool,
    #[serde(alias = "pricealerts")]
    pub price_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            booking_confirmations: true,
            trip_reminders: true,
            price_alerts: false,
        }
    }
}

impl NotificationSettings {
    pub fn get(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::BookingConfirmations => self.booking_confirmations,
            NotificationKind::TripReminders => self.trip_reminders,
            NotificationKind::PriceAlerts => self.price_alerts,
        }
    }

    /// Patch that flips a single flag and leaves the rest alone
    pub fn toggle(&self, kind: NotificationKind) -> NotificationsPatch {
        let flipped = Some(!self.get(kind));
        match kind {
            NotificationKind::BookingConfirmations => NotificationsPatch {
                booking_confirmations: flipped,
                ..Default::default()
            },
            NotificationKind::TripReminders => NotificationsPatch {
                trip_reminders: flipped,
                ..Default::default()
            },
            NotificationKind::PriceAlerts => NotificationsPatch {
                price_alerts: flipped,
                ..Default::default()
            },
        }
    }

    /// Per-flag merge: unset fields in the patch keep their current value.
    pub fn merged(&self, patch: &NotificationsPatch) -> Self {
        Self {
            booking_confirmations: patch.booking_confirmations.unwrap_or(self.booking_confirmations),
            trip_reminders: patch.trip_reminders.unwrap_or(self.trip_reminders),
            price_alerts: patch.price_alerts.unwrap_or(self.price_alerts),
        }
    }
}

/// Process-wide display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub currency: Currency,
    // Layered config sources lowercase their keys
    #[serde(alias = "dateformat", alias = "date_format")]
    pub date_format: DateFormat,
    #[serde(alias = "timeformat", alias = "time_format")]
    pub time_format: TimeFormat,
    pub language: String,
    pub notifications: NotificationSettings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            date_format: DateFormat::MonthFirst,
            time_format: TimeFormat::TwelveHour,
            language: "en".to_string(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Preferences {
    /// Apply a partial update. Top-level fields are replaced when present;
    /// notification flags are merged individually.
    pub fn merged(&self, patch: &PreferencesPatch) -> Self {
        Self {
            currency: patch.currency.unwrap_or(self.currency),
            date_format: patch.date_format.unwrap_or(self.date_format),
            time_format: patch.time_format.unwrap_or(self.time_format),
            language: patch.language.clone().unwrap_or_else(|| self.language.clone()),
            notifications: match &patch.notifications {
                Some(n) => self.notifications.merged(n),
                None => self.notifications,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_confirmations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_alerts: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationsPatch>,
}

impl PreferencesPatch {
    pub fn currency(currency: Currency) -> Self {
        Self {
            currency: Some(currency),
            ..Default::default()
        }
    }

    pub fn date_format(date_format: DateFormat) -> Self {
        Self {
            date_format: Some(date_format),
            ..Default::default()
        }
    }

    pub fn notifications(patch: NotificationsPatch) -> Self {
        Self {
            notifications: Some(patch),
            ..Default::default()
        }
    }
}
