//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the parameters of a fired
//! trigger. A guarded transition is only taken when its guard passes.

use super::parameters::Parameters;
use std::fmt;
use std::sync::Arc;

/// Named predicate that determines if a transition can execute.
///
/// The description is reported when a trigger is rejected because no
/// guard passed, and appears in topology snapshots.
///
/// # Example
///
/// ```rust
/// use switchboard::core::{Guard, Parameters};
///
/// let loud_enough = Guard::new("volume above 5", |p: &Parameters| {
///     p.get::<i32>(0).is_some_and(|volume| *volume > 5)
/// });
///
/// assert!(loud_enough.check(&Parameters::new().with(11_i32)));
/// assert!(!loud_enough.check(&Parameters::new().with(2_i32)));
/// assert!(!loud_enough.check(&Parameters::new()));
/// assert_eq!(loud_enough.description(), "volume above 5");
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Parameters) -> bool + Send + Sync>,
    description: String,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Parameters) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            description: description.into(),
        }
    }

    /// Check if the guard allows a transition fired with these parameters.
    pub fn check(&self, parameters: &Parameters) -> bool {
        (self.predicate)(parameters)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
