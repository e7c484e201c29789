//! Configuration errors raised while setting up a machine.

use thiserror::Error;

/// Errors that can occur when configuring states and triggers.
///
/// A failed configuration call leaves the registry exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Trigger '{trigger}' is already configured on state '{state}'")]
    DuplicateTrigger { state: String, trigger: String },

    #[error(
        "Trigger '{trigger}' on state '{state}' targets the same state. \
         Use permit_reentry() or internal_transition() instead"
    )]
    SelfTransition { state: String, trigger: String },

    #[error("Making '{state}' a substate of '{superstate}' would create a cycle")]
    HierarchyCycle { state: String, superstate: String },

    #[error("Parameters for trigger '{trigger}' have already been declared")]
    ParametersAlreadyDeclared { trigger: String },

    #[error("Trigger '{trigger}' has no parameter declaration on this machine")]
    UndeclaredTrigger { trigger: String },

    #[error("Trigger '{trigger}' is declared with parameters {declared:?}, handle expects {handle:?}")]
    ParameterMismatch {
        trigger: String,
        declared: Vec<&'static str>,
        handle: Vec<&'static str>,
    },
}
