use flexisure_core::SimulationConfig;
use flexisure_pricing::PricingConfig;
use flexisure_shared::Preferences;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub pricing: PricingConfig,
    pub simulation: SimulationConfig,
    /// Preferences every session starts with
    pub preferences: Preferences,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every section has serde defaults, so all files are optional
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `FLEXISURE__PRICING__CANCELLATION_FEE=20`
            .add_source(config::Environment::with_prefix("FLEXISURE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document on its own, without files or environment
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
