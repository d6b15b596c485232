//! Explorer Configuration Module
//!
//! Data file locations, display-unit divisors and view defaults loaded from
//! TOML.
//!
//! ## Loading Order
//!
//! 1. `VM_EXPLORER_CONFIG` environment variable (path to TOML file)
//! 2. `explorer.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The config is an ordinary value handed to [`crate::engine::Engine`] at
//! construction; nothing in the crate reads it from global state.

mod dashboard_config;
pub mod defaults;
pub mod validation;

pub use dashboard_config::*;
