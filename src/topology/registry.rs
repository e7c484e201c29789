//! State topology registry and hierarchical trigger resolution.

use super::representation::{Behaviour, StateRepresentation};
use super::triggers::TriggerRegistry;
use crate::builder::ConfigError;
use crate::core::{Parameters, State, Trigger};
use std::collections::HashMap;
use tracing::trace;

/// Outcome of resolving a trigger against a state and its ancestors.
pub(crate) enum Resolution<'a, S: State, T: Trigger> {
    Handled {
        /// The level of the hierarchy that handles the trigger
        state: &'a S,
        behaviour: &'a Behaviour<S, T>,
    },
    Unhandled {
        /// Descriptions of guards that matched the trigger but did not pass
        unmet_guards: Vec<String>,
    },
}

/// All state configurations of one machine, in registration order.
pub(crate) struct TopologyRegistry<S: State, T: Trigger> {
    states: Vec<StateRepresentation<S, T>>,
    index: HashMap<S, usize>,
    pub(crate) triggers: TriggerRegistry<T>,
}

impl<S: State, T: Trigger> TopologyRegistry<S, T> {
    pub(crate) fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            triggers: TriggerRegistry::new(),
        }
    }

    /// Return the record for `state`, creating an empty one if needed.
    pub(crate) fn ensure(&mut self, state: &S) -> &mut StateRepresentation<S, T> {
        let i = match self.index.get(state) {
            Some(&i) => i,
            None => {
                let i = self.states.len();
                self.states.push(StateRepresentation::new(state.clone()));
                self.index.insert(state.clone(), i);
                i
            }
        };
        &mut self.states[i]
    }

    pub(crate) fn get(&self, state: &S) -> Option<&StateRepresentation<S, T>> {
        self.index.get(state).map(|&i| &self.states[i])
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &StateRepresentation<S, T>> {
        self.states.iter()
    }

    /// `state` followed by each of its ancestors, innermost first.
    pub(crate) fn ancestry(&self, state: &S) -> Vec<S> {
        let mut chain = vec![state.clone()];
        let mut current = state;
        while let Some(parent) = self.get(current).and_then(|r| r.superstate.as_ref()) {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// True if `state` is `ancestor` or one of its substates, at any depth.
    pub(crate) fn is_within(&self, state: &S, ancestor: &S) -> bool {
        self.ancestry(state).iter().any(|s| s == ancestor)
    }

    /// Link `state` under `superstate`, rejecting cycles.
    pub(crate) fn set_superstate(&mut self, state: &S, superstate: &S) -> Result<(), ConfigError> {
        if self.is_within(superstate, state) {
            return Err(ConfigError::HierarchyCycle {
                state: state.name().to_string(),
                superstate: superstate.name().to_string(),
            });
        }
        self.ensure(superstate);
        self.ensure(state).superstate = Some(superstate.clone());
        Ok(())
    }

    /// Find the innermost level of `state`'s hierarchy that handles `trigger`.
    ///
    /// A level whose guard rejects `parameters` does not handle the trigger;
    /// resolution continues with its superstate.
    pub(crate) fn resolve<'a>(
        &'a self,
        state: &S,
        trigger: &T,
        parameters: &Parameters,
    ) -> Resolution<'a, S, T> {
        let mut unmet_guards = Vec::new();
        let mut level = self.get(state);

        while let Some(rep) = level {
            if let Some(behaviour) = rep.behaviour_for(trigger) {
                match behaviour.guard() {
                    Some(guard) if !guard.check(parameters) => {
                        trace!(
                            state = rep.state.name(),
                            trigger = trigger.name(),
                            guard = guard.description(),
                            "guard rejected trigger"
                        );
                        unmet_guards.push(guard.description().to_string());
                    }
                    _ => {
                        return Resolution::Handled {
                            state: &rep.state,
                            behaviour,
                        }
                    }
                }
            }
            level = rep.superstate.as_ref().and_then(|parent| self.get(parent));
        }

        Resolution::Unhandled { unmet_guards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        OffHook,
        Connected,
        OnHold,
        Muffled,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::OffHook => "OffHook",
                Self::Connected => "Connected",
                Self::OnHold => "OnHold",
                Self::Muffled => "Muffled",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestTrigger {
        LeftMessage,
        TakenOffHold,
        Other,
    }

    impl Trigger for TestTrigger {
        fn name(&self) -> &str {
            match self {
                Self::LeftMessage => "LeftMessage",
                Self::TakenOffHold => "TakenOffHold",
                Self::Other => "Other",
            }
        }
    }

    fn permit(
        registry: &mut TopologyRegistry<TestState, TestTrigger>,
        from: TestState,
        trigger: TestTrigger,
        to: TestState,
    ) {
        registry
            .ensure(&from)
            .add_behaviour(
                trigger,
                Behaviour::Transition {
                    destination: to,
                    guard: None,
                },
            )
            .unwrap();
    }

    fn handling_state(
        registry: &TopologyRegistry<TestState, TestTrigger>,
        state: TestState,
        trigger: TestTrigger,
    ) -> Option<TestState> {
        match registry.resolve(&state, &trigger, &Parameters::new()) {
            Resolution::Handled { state, .. } => Some(state.clone()),
            Resolution::Unhandled { .. } => None,
        }
    }

    #[test]
    fn unconfigured_state_handles_nothing() {
        let registry: TopologyRegistry<TestState, TestTrigger> = TopologyRegistry::new();
        assert_eq!(
            handling_state(&registry, TestState::OffHook, TestTrigger::Other),
            None
        );
    }

    #[test]
    fn substate_inherits_superstate_transitions() {
        let mut registry = TopologyRegistry::new();
        permit(
            &mut registry,
            TestState::Connected,
            TestTrigger::LeftMessage,
            TestState::OffHook,
        );
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        assert_eq!(
            handling_state(&registry, TestState::OnHold, TestTrigger::LeftMessage),
            Some(TestState::Connected)
        );
    }

    #[test]
    fn substate_handling_shadows_superstate() {
        let mut registry = TopologyRegistry::new();
        permit(
            &mut registry,
            TestState::Connected,
            TestTrigger::LeftMessage,
            TestState::OffHook,
        );
        permit(
            &mut registry,
            TestState::OnHold,
            TestTrigger::LeftMessage,
            TestState::Muffled,
        );
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        assert_eq!(
            handling_state(&registry, TestState::OnHold, TestTrigger::LeftMessage),
            Some(TestState::OnHold)
        );
    }

    #[test]
    fn direct_cycle_is_rejected() {
        let mut registry: TopologyRegistry<TestState, TestTrigger> = TopologyRegistry::new();
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        let result = registry.set_superstate(&TestState::Connected, &TestState::OnHold);
        assert!(matches!(result, Err(ConfigError::HierarchyCycle { .. })));
        assert_eq!(registry.get(&TestState::Connected).unwrap().superstate, None);
    }

    #[test]
    fn transitive_cycle_is_rejected() {
        let mut registry: TopologyRegistry<TestState, TestTrigger> = TopologyRegistry::new();
        registry
            .set_superstate(&TestState::Muffled, &TestState::OnHold)
            .unwrap();
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        let result = registry.set_superstate(&TestState::Connected, &TestState::Muffled);
        assert!(matches!(result, Err(ConfigError::HierarchyCycle { .. })));
    }

    #[test]
    fn self_superstate_is_rejected() {
        let mut registry: TopologyRegistry<TestState, TestTrigger> = TopologyRegistry::new();
        let result = registry.set_superstate(&TestState::OnHold, &TestState::OnHold);
        assert!(matches!(result, Err(ConfigError::HierarchyCycle { .. })));
    }

    #[test]
    fn ancestry_is_innermost_first() {
        let mut registry: TopologyRegistry<TestState, TestTrigger> = TopologyRegistry::new();
        registry
            .set_superstate(&TestState::Muffled, &TestState::OnHold)
            .unwrap();
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        assert_eq!(
            registry.ancestry(&TestState::Muffled),
            vec![TestState::Muffled, TestState::OnHold, TestState::Connected]
        );
        assert!(registry.is_within(&TestState::Muffled, &TestState::Connected));
        assert!(!registry.is_within(&TestState::Connected, &TestState::Muffled));
    }

    #[test]
    fn failing_guard_falls_back_to_superstate() {
        let mut registry = TopologyRegistry::new();
        permit(
            &mut registry,
            TestState::Connected,
            TestTrigger::TakenOffHold,
            TestState::OffHook,
        );
        registry
            .ensure(&TestState::OnHold)
            .add_behaviour(
                TestTrigger::TakenOffHold,
                Behaviour::Transition {
                    destination: TestState::Muffled,
                    guard: Some(Guard::new("never", |_: &Parameters| false)),
                },
            )
            .unwrap();
        registry
            .set_superstate(&TestState::OnHold, &TestState::Connected)
            .unwrap();

        assert_eq!(
            handling_state(&registry, TestState::OnHold, TestTrigger::TakenOffHold),
            Some(TestState::Connected)
        );
    }

    #[test]
    fn unmet_guards_are_reported() {
        let mut registry = TopologyRegistry::new();
        registry
            .ensure(&TestState::OnHold)
            .add_behaviour(
                TestTrigger::TakenOffHold,
                Behaviour::Transition {
                    destination: TestState::Connected,
                    guard: Some(Guard::new("caller still there", |_: &Parameters| false)),
                },
            )
            .unwrap();

        match registry.resolve(&TestState::OnHold, &TestTrigger::TakenOffHold, &Parameters::new()) {
            Resolution::Unhandled { unmet_guards } => {
                assert_eq!(unmet_guards, vec!["caller still there".to_string()]);
            }
            Resolution::Handled { .. } => panic!("Expected unhandled trigger"),
        }
    }
}
