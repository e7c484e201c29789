//! Parameterized trigger declarations.

use crate::builder::ConfigError;
use crate::core::{ParameterList, ParameterType, Parameters, Trigger};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Typed handle for a trigger declared with parameters `A`.
///
/// Obtained from [`StateMachine::set_trigger_parameters`]. Fire it with
/// [`StateMachine::fire_with`] and bind callbacks to it with
/// [`StateConfiguration::on_entry_from`] or
/// [`StateConfiguration::internal_transition_with`].
///
/// [`StateMachine::set_trigger_parameters`]: crate::engine::StateMachine::set_trigger_parameters
/// [`StateMachine::fire_with`]: crate::engine::StateMachine::fire_with
/// [`StateConfiguration::on_entry_from`]: crate::builder::StateConfiguration::on_entry_from
/// [`StateConfiguration::internal_transition_with`]: crate::builder::StateConfiguration::internal_transition_with
pub struct TriggerWithParameters<T: Trigger, A: ParameterList> {
    trigger: T,
    _parameters: PhantomData<fn() -> A>,
}

impl<T: Trigger, A: ParameterList> TriggerWithParameters<T, A> {
    pub(crate) fn new(trigger: T) -> Self {
        Self {
            trigger,
            _parameters: PhantomData,
        }
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }
}

impl<T: Trigger, A: ParameterList> Clone for TriggerWithParameters<T, A> {
    fn clone(&self) -> Self {
        Self::new(self.trigger.clone())
    }
}

impl<T: Trigger, A: ParameterList> fmt::Debug for TriggerWithParameters<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = A::types().iter().map(ParameterType::name).collect();
        f.debug_struct("TriggerWithParameters")
            .field("trigger", &self.trigger)
            .field("parameters", &names)
            .finish()
    }
}

/// Declared parameter shapes, in declaration order.
pub(crate) struct TriggerRegistry<T: Trigger> {
    declared: Vec<(T, Vec<ParameterType>)>,
    index: HashMap<T, usize>,
}

impl<T: Trigger> TriggerRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            declared: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn declare<A: ParameterList>(
        &mut self,
        trigger: T,
    ) -> Result<TriggerWithParameters<T, A>, ConfigError> {
        if self.index.contains_key(&trigger) {
            return Err(ConfigError::ParametersAlreadyDeclared {
                trigger: trigger.name().to_string(),
            });
        }
        self.index.insert(trigger.clone(), self.declared.len());
        self.declared.push((trigger.clone(), A::types()));
        Ok(TriggerWithParameters::new(trigger))
    }

    /// Declared shape, empty for triggers fired without parameters.
    pub(crate) fn expected(&self, trigger: &T) -> &[ParameterType] {
        self.index
            .get(trigger)
            .map(|&i| self.declared[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn accepts(&self, trigger: &T, parameters: &Parameters) -> bool {
        parameters.matches(self.expected(trigger))
    }

    /// Check that a handle agrees with this registry's declaration.
    pub(crate) fn check_handle<A: ParameterList>(
        &self,
        handle: &TriggerWithParameters<T, A>,
    ) -> Result<(), ConfigError> {
        if !self.index.contains_key(handle.trigger()) {
            return Err(ConfigError::UndeclaredTrigger {
                trigger: handle.trigger().name().to_string(),
            });
        }
        let declared = self.expected(handle.trigger());
        let expected = A::types();
        if declared == expected.as_slice() {
            Ok(())
        } else {
            Err(ConfigError::ParameterMismatch {
                trigger: handle.trigger().name().to_string(),
                declared: declared.iter().map(ParameterType::name).collect(),
                handle: expected.iter().map(ParameterType::name).collect(),
            })
        }
    }

    /// True if `trigger` cannot be fired without parameters.
    pub(crate) fn takes_parameters(&self, trigger: &T) -> bool {
        !self.expected(trigger).is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&T, &[ParameterType])> {
        self.declared
            .iter()
            .map(|(trigger, types)| (trigger, types.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestTrigger {
        SetVolume,
        Dial,
        Mute,
    }

    impl Trigger for TestTrigger {
        fn name(&self) -> &str {
            match self {
                Self::SetVolume => "SetVolume",
                Self::Dial => "Dial",
                Self::Mute => "Mute",
            }
        }
    }

    #[test]
    fn declare_records_shape() {
        let mut registry = TriggerRegistry::new();
        let handle = registry
            .declare::<(i32,)>(TestTrigger::SetVolume)
            .unwrap();

        assert_eq!(handle.trigger(), &TestTrigger::SetVolume);
        assert_eq!(registry.expected(&TestTrigger::SetVolume), <(i32,)>::types());
        assert!(registry.takes_parameters(&TestTrigger::SetVolume));
        assert!(!registry.takes_parameters(&TestTrigger::Mute));
    }

    #[test]
    fn empty_declaration_takes_no_parameters() {
        let mut registry = TriggerRegistry::new();
        registry.declare::<()>(TestTrigger::Mute).unwrap();

        assert!(!registry.takes_parameters(&TestTrigger::Mute));
        assert!(registry.accepts(&TestTrigger::Mute, &Parameters::new()));
    }

    #[test]
    fn declaring_twice_fails() {
        let mut registry = TriggerRegistry::new();
        registry.declare::<(String,)>(TestTrigger::Dial).unwrap();

        let result = registry.declare::<(i32,)>(TestTrigger::Dial);
        assert!(matches!(
            result,
            Err(ConfigError::ParametersAlreadyDeclared { .. })
        ));
        assert_eq!(registry.expected(&TestTrigger::Dial), <(String,)>::types());
    }

    #[test]
    fn undeclared_triggers_accept_only_empty_parameters() {
        let registry: TriggerRegistry<TestTrigger> = TriggerRegistry::new();

        assert!(registry.accepts(&TestTrigger::Mute, &Parameters::new()));
        assert!(!registry.accepts(&TestTrigger::Mute, &Parameters::new().with(1_i32)));
    }

    #[test]
    fn declared_triggers_check_types() {
        let mut registry = TriggerRegistry::new();
        registry.declare::<(i32,)>(TestTrigger::SetVolume).unwrap();

        assert!(registry.accepts(&TestTrigger::SetVolume, &Parameters::new().with(11_i32)));
        assert!(!registry.accepts(&TestTrigger::SetVolume, &Parameters::new().with(11_i64)));
        assert!(!registry.accepts(&TestTrigger::SetVolume, &Parameters::new()));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut other = TriggerRegistry::new();
        let handle = other.declare::<(String,)>(TestTrigger::Dial).unwrap();

        let mut registry = TriggerRegistry::new();
        registry.declare::<(i32,)>(TestTrigger::Dial).unwrap();

        assert!(matches!(
            registry.check_handle(&handle),
            Err(ConfigError::ParameterMismatch { .. })
        ));
        assert!(other.check_handle(&handle).is_ok());
    }

    #[test]
    fn handle_for_undeclared_trigger_is_rejected() {
        let mut other = TriggerRegistry::new();
        let handle = other.declare::<()>(TestTrigger::Mute).unwrap();

        let registry: TriggerRegistry<TestTrigger> = TriggerRegistry::new();

        assert_eq!(
            registry.check_handle(&handle),
            Err(ConfigError::UndeclaredTrigger {
                trigger: "Mute".to_string()
            })
        );
    }
}
