//! Shared domain types and configuration for Brand Monitor.
//!
//! Defines the `Mention` record and its supporting enums (`Platform`,
//! `Sentiment`, `TimeRange`), the sparse `Engagement` counters, and the
//! env-var backed application config used by every other crate.

mod app_config;
mod config;
mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use types::{CoreError, Engagement, Mention, Platform, Sentiment, TimeRange};
