//! Transition records handed to callbacks.

use super::parameters::Parameters;
use super::state::{State, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a fired trigger was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// The state changed; exit and entry actions ran.
    External,
    /// The configured state was left and entered again.
    Reentry,
    /// The state did not change; only the internal action ran.
    Internal,
}

/// Record of a single fired trigger.
///
/// Records are created per fire, passed by reference to entry, exit,
/// internal and observer callbacks, and dropped when the fire returns.
/// For internal transitions `source == destination`.
#[derive(Clone, Debug)]
pub struct Transition<S: State, T: Trigger> {
    /// The state the machine was in when the trigger fired
    pub source: S,
    /// The state the machine is in once the trigger completes
    pub destination: S,
    /// The trigger that caused the transition
    pub trigger: T,
    /// Values bound to the trigger, in declared order
    pub parameters: Parameters,
    pub kind: TransitionKind,
    /// When the trigger was fired
    pub timestamp: DateTime<Utc>,
}

impl<S: State, T: Trigger> Transition<S, T> {
    pub(crate) fn new(
        source: S,
        destination: S,
        trigger: T,
        parameters: Parameters,
        kind: TransitionKind,
    ) -> Self {
        Self {
            source,
            destination,
            trigger,
            parameters,
            kind,
            timestamp: Utc::now(),
        }
    }

    /// True when the configured state was left and entered again.
    ///
    /// A reentry fired from a substate has `source != destination`.
    pub fn is_reentry(&self) -> bool {
        self.kind == TransitionKind::Reentry
    }

    pub fn is_internal(&self) -> bool {
        self.kind == TransitionKind::Internal
    }
}
