use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_service_fee_rate")]
    pub service_fee_rate: f64,
    #[serde(default = "default_open_hour")]
    pub slot_open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub slot_close_hour: u32,
    #[serde(default = "default_availability_probability")]
    pub availability_probability: f64,
    /// Simulated latency of the availability lookup
    #[serde(default = "default_availability_delay_ms")]
    pub availability_delay_ms: u64,
    /// Simulated latency of the confirmation commit
    #[serde(default = "default_confirm_delay_ms")]
    pub confirm_delay_ms: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_service_fee_rate() -> f64 {
    0.05
}
fn default_open_hour() -> u32 {
    6
}
fn default_close_hour() -> u32 {
    23
}
fn default_availability_probability() -> f64 {
    0.7
}
fn default_availability_delay_ms() -> u64 {
    500
}
fn default_confirm_delay_ms() -> u64 {
    3000
}
fn default_currency() -> String {
    "MAD".to_string()
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            service_fee_rate: default_service_fee_rate(),
            slot_open_hour: default_open_hour(),
            slot_close_hour: default_close_hour(),
            availability_probability: default_availability_probability(),
            availability_delay_ms: default_availability_delay_ms(),
            confirm_delay_ms: default_confirm_delay_ms(),
            currency: default_currency(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Then the current environment file, which is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Then a local file that shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Finally the environment, e.g. TERRABOOK_SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("TERRABOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
