//! Built-in health checks

pub mod config;
pub mod scenarios;

pub use config::ConfigCheck;
pub use scenarios::ScenarioCheck;
