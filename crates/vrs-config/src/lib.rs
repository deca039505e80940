//! Operator configuration loading and validation (resched.toml).

pub mod config;

pub use config::{Config, Credentials, DelayConfig, validate_config};
