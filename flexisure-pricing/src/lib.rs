pub mod format;
pub mod refund;

pub use format::{format_currency, format_date, INVALID_DATE};
pub use refund::{PricingConfig, PricingEngine, ProcessingWindow, Refund, RefundQuote};
