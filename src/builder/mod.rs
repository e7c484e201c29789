//! Builder API for configuring a state machine.
//!
//! This module provides the fluent per-state configuration builder, the
//! configuration error type, and macros for declaring state and trigger
//! enums with minimal boilerplate.

pub mod configuration;
pub mod error;
pub mod macros;

pub use configuration::StateConfiguration;
pub use error::ConfigError;
