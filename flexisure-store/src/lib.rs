pub mod app_config;
pub mod state;
pub mod store;

pub use app_config::Config;
pub use state::{reduce, Action, AppState};
pub use store::Store;
