//! Shared configuration and logging setup for ServiceToken crates
//!
//! - Configuration types (key paths, environment, logging)
//! - Tracing subscriber initialisation

pub mod config;
pub mod logging;

pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenConfig};
