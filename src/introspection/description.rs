//! Serializable snapshot of a machine's topology.

use crate::core::{ParameterType, State, Trigger};
use crate::topology::{Behaviour, TopologyRegistry};
use serde::{Deserialize, Serialize};

/// Structural description of a configured machine.
///
/// Every value is copied out of the registry; mutating a description has
/// no effect on the machine it came from. The format carries no diagram
/// syntax: renderers consume it as plain data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TopologyDescription<S: State, T: Trigger> {
    pub initial_state: S,
    /// Configured states, in registration order
    pub states: Vec<StateDescription<S, T>>,
    /// Triggers declared with parameters, in declaration order
    pub triggers: Vec<TriggerDescription<T>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateDescription<S: State, T: Trigger> {
    pub state: S,
    pub superstate: Option<S>,
    /// Direct substates, in registration order
    pub substates: Vec<S>,
    pub transitions: Vec<TransitionDescription<S, T>>,
    pub entry_actions: Vec<EntryActionDescription<T>>,
    pub exit_actions: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TransitionDescription<S: State, T: Trigger> {
    External {
        trigger: T,
        destination: S,
        guard: Option<String>,
    },
    Reentry {
        trigger: T,
    },
    Internal {
        trigger: T,
    },
    Ignored {
        trigger: T,
    },
}

impl<S: State, T: Trigger> TransitionDescription<S, T> {
    pub fn trigger(&self) -> &T {
        match self {
            Self::External { trigger, .. }
            | Self::Reentry { trigger }
            | Self::Internal { trigger }
            | Self::Ignored { trigger } => trigger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EntryActionDescription<T: Trigger> {
    /// Set when the action only runs for entries caused by this trigger
    pub from_trigger: Option<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TriggerDescription<T: Trigger> {
    pub trigger: T,
    /// Rust type names of the declared parameters, in order
    pub parameters: Vec<String>,
}

impl<S: State, T: Trigger> TopologyDescription<S, T> {
    pub(crate) fn capture(registry: &TopologyRegistry<S, T>, initial_state: &S) -> Self {
        let states = registry
            .iter()
            .map(|rep| StateDescription {
                state: rep.state.clone(),
                superstate: rep.superstate.clone(),
                substates: registry
                    .iter()
                    .filter(|child| child.superstate.as_ref() == Some(&rep.state))
                    .map(|child| child.state.clone())
                    .collect(),
                transitions: rep
                    .behaviours
                    .iter()
                    .map(|entry| {
                        let trigger = entry.trigger.clone();
                        match &entry.behaviour {
                            Behaviour::Transition { destination, guard } => {
                                TransitionDescription::External {
                                    trigger,
                                    destination: destination.clone(),
                                    guard: guard.as_ref().map(|g| g.description().to_string()),
                                }
                            }
                            Behaviour::Reentry => TransitionDescription::Reentry { trigger },
                            Behaviour::Internal { .. } => TransitionDescription::Internal { trigger },
                            Behaviour::Ignore => TransitionDescription::Ignored { trigger },
                        }
                    })
                    .collect(),
                entry_actions: rep
                    .entry_actions
                    .iter()
                    .map(|entry| EntryActionDescription {
                        from_trigger: entry.from.clone(),
                    })
                    .collect(),
                exit_actions: rep.exit_actions.len(),
            })
            .collect();

        let triggers = registry
            .triggers
            .iter()
            .map(|(trigger, types)| TriggerDescription {
                trigger: trigger.clone(),
                parameters: types
                    .iter()
                    .map(|t| ParameterType::name(t).to_string())
                    .collect(),
            })
            .collect();

        Self {
            initial_state: initial_state.clone(),
            states,
            triggers,
        }
    }

    /// Look up the description of `state`.
    pub fn state(&self, state: &S) -> Option<&StateDescription<S, T>> {
        self.states.iter().find(|s| &s.state == state)
    }

    /// True if `state` is `ancestor` or nested under it.
    ///
    /// Stops after visiting every described state once, so a hand-edited
    /// cyclic description cannot loop.
    pub fn is_within(&self, state: &S, ancestor: &S) -> bool {
        let mut current = Some(state);
        for _ in 0..=self.states.len() {
            match current {
                Some(s) if s == ancestor => return true,
                Some(s) => current = self.state(s).and_then(|d| d.superstate.as_ref()),
                None => return false,
            }
        }
        false
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
