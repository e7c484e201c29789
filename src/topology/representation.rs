//! Per-state configuration records.

use crate::builder::ConfigError;
use crate::core::{Guard, State, Transition, Trigger};
use std::sync::Arc;

/// Callback run with the record of the transition that invoked it.
pub type Action<S, T> = Arc<dyn Fn(&Transition<S, T>) + Send + Sync>;

/// What a state does when a trigger resolves to it.
pub(crate) enum Behaviour<S: State, T: Trigger> {
    Transition { destination: S, guard: Option<Guard> },
    Reentry,
    Internal { action: Action<S, T> },
    Ignore,
}

impl<S: State, T: Trigger> Behaviour<S, T> {
    pub(crate) fn guard(&self) -> Option<&Guard> {
        match self {
            Self::Transition { guard, .. } => guard.as_ref(),
            _ => None,
        }
    }
}

pub(crate) struct TriggerBehaviour<S: State, T: Trigger> {
    pub(crate) trigger: T,
    pub(crate) behaviour: Behaviour<S, T>,
}

pub(crate) struct EntryAction<S: State, T: Trigger> {
    /// Only run when entry was caused by this trigger.
    pub(crate) from: Option<T>,
    pub(crate) action: Action<S, T>,
}

/// Everything configured for one state.
pub(crate) struct StateRepresentation<S: State, T: Trigger> {
    pub(crate) state: S,
    pub(crate) superstate: Option<S>,
    pub(crate) behaviours: Vec<TriggerBehaviour<S, T>>,
    pub(crate) entry_actions: Vec<EntryAction<S, T>>,
    pub(crate) exit_actions: Vec<Action<S, T>>,
}

impl<S: State, T: Trigger> StateRepresentation<S, T> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            superstate: None,
            behaviours: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
        }
    }

    pub(crate) fn behaviour_for(&self, trigger: &T) -> Option<&Behaviour<S, T>> {
        self.behaviours
            .iter()
            .find(|b| &b.trigger == trigger)
            .map(|b| &b.behaviour)
    }

    /// Register a behaviour; a trigger gets at most one per state.
    pub(crate) fn add_behaviour(
        &mut self,
        trigger: T,
        behaviour: Behaviour<S, T>,
    ) -> Result<(), ConfigError> {
        if self.behaviour_for(&trigger).is_some() {
            return Err(ConfigError::DuplicateTrigger {
                state: self.state.name().to_string(),
                trigger: trigger.name().to_string(),
            });
        }
        if let Behaviour::Transition { destination, .. } = &behaviour {
            if *destination == self.state {
                return Err(ConfigError::SelfTransition {
                    state: self.state.name().to_string(),
                    trigger: trigger.name().to_string(),
                });
            }
        }
        self.behaviours.push(TriggerBehaviour { trigger, behaviour });
        Ok(())
    }

    /// Entry actions that apply when `trigger` caused the entry.
    pub(crate) fn entry_actions_for<'a>(
        &'a self,
        trigger: &'a T,
    ) -> impl Iterator<Item = &'a Action<S, T>> + 'a {
        self.entry_actions
            .iter()
            .filter(move |entry| entry.from.as_ref().is_none_or(|from| from == trigger))
            .map(|entry| &entry.action)
    }
}
