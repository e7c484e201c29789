//! Core state machine types.
//!
//! This module contains the value types shared by every other module:
//! - State and trigger identifiers via the `State` and `Trigger` traits
//! - Typed, type-erased trigger parameters
//! - Guard predicates for transition control
//! - Transition records handed to callbacks

mod guard;
mod parameters;
mod state;
mod transition;

pub use guard::Guard;
pub use parameters::{Parameter, ParameterList, ParameterType, Parameters};
pub use state::{State, Trigger};
pub use transition::{Transition, TransitionKind};
