//! Errors returned when firing triggers.

use thiserror::Error;

/// Errors that can occur while firing a trigger.
///
/// The machine's state is unchanged whenever one of these is returned
/// for the trigger that was fired directly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FireError {
    #[error(
        "No valid transitions are permitted from state '{state}' for trigger '{trigger}' \
         (unmet guards: {unmet_guards:?})"
    )]
    InvalidTransition {
        state: String,
        trigger: String,
        unmet_guards: Vec<String>,
    },

    #[error("Trigger '{trigger}' expects parameters {expected:?}, got {actual:?}")]
    Arity {
        trigger: String,
        expected: Vec<&'static str>,
        actual: Vec<&'static str>,
    },
}
