pub mod booking;
pub mod preferences;
