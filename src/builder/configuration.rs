//! Fluent configuration of a single state.

use crate::builder::error::ConfigError;
use crate::core::{Guard, ParameterList, State, Transition, Trigger};
use crate::topology::{Action, Behaviour, EntryAction, TopologyRegistry, TriggerWithParameters};
use std::sync::Arc;
use tracing::warn;

/// Builder bound to one state's configuration record.
///
/// Returned by [`StateMachine::configure`]. Operations that can conflict
/// with existing configuration return `Result<Self, ConfigError>`; the
/// rest return `Self`. A failed call leaves the record unchanged.
///
/// [`StateMachine::configure`]: crate::engine::StateMachine::configure
pub struct StateConfiguration<'a, S: State, T: Trigger> {
    registry: &'a mut TopologyRegistry<S, T>,
    state: S,
}

impl<'a, S: State, T: Trigger> StateConfiguration<'a, S, T> {
    pub(crate) fn new(registry: &'a mut TopologyRegistry<S, T>, state: S) -> Self {
        registry.ensure(&state);
        Self { registry, state }
    }

    /// The state being configured.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Move to `destination` when `trigger` fires.
    pub fn permit(self, trigger: T, destination: S) -> Result<Self, ConfigError> {
        self.permit_guarded(trigger, destination, None)
    }

    /// Move to `destination` when `trigger` fires and `guard` passes.
    pub fn permit_if(self, trigger: T, destination: S, guard: Guard) -> Result<Self, ConfigError> {
        self.permit_guarded(trigger, destination, Some(guard))
    }

    fn permit_guarded(
        self,
        trigger: T,
        destination: S,
        guard: Option<Guard>,
    ) -> Result<Self, ConfigError> {
        let target = destination.clone();
        let this = self.add(
            trigger,
            Behaviour::Transition {
                destination,
                guard,
            },
        )?;
        this.registry.ensure(&target);
        Ok(this)
    }

    /// Leave and re-enter this state when `trigger` fires.
    ///
    /// Exit and entry actions of this state run.
    pub fn permit_reentry(self, trigger: T) -> Result<Self, ConfigError> {
        self.add(trigger, Behaviour::Reentry)
    }

    /// Accept `trigger` without doing anything.
    pub fn ignore(self, trigger: T) -> Result<Self, ConfigError> {
        self.add(trigger, Behaviour::Ignore)
    }

    /// Run `action` on `trigger` without leaving this state.
    pub fn internal_transition<F>(self, trigger: T, action: F) -> Result<Self, ConfigError>
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.add(
            trigger,
            Behaviour::Internal {
                action: Arc::new(action),
            },
        )
    }

    /// Run `action` with the decoded parameters of a parameterized trigger,
    /// without leaving this state.
    pub fn internal_transition_with<A, F>(
        self,
        trigger: &TriggerWithParameters<T, A>,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        A: ParameterList,
        F: Fn(A, &Transition<S, T>) + Send + Sync + 'static,
    {
        self.registry.triggers.check_handle(trigger)?;
        self.add(
            trigger.trigger().clone(),
            Behaviour::Internal {
                action: typed(action),
            },
        )
    }

    /// Run `action` whenever this state is entered.
    pub fn on_entry<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.push_entry(None, Arc::new(action))
    }

    /// Run `action` with the decoded parameters when this state is entered
    /// because `trigger` fired.
    pub fn on_entry_from<A, F>(
        self,
        trigger: &TriggerWithParameters<T, A>,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        A: ParameterList,
        F: Fn(A, &Transition<S, T>) + Send + Sync + 'static,
    {
        self.registry.triggers.check_handle(trigger)?;
        Ok(self.push_entry(Some(trigger.trigger().clone()), typed(action)))
    }

    /// Run `action` when this state is entered because `trigger` fired.
    pub fn on_entry_from_trigger<F>(self, trigger: T, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.push_entry(Some(trigger), Arc::new(action))
    }

    /// Run `action` whenever this state is exited.
    pub fn on_exit<F>(self, action: F) -> Self
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.registry
            .ensure(&self.state)
            .exit_actions
            .push(Arc::new(action));
        self
    }

    /// Make this state a substate of `superstate`.
    ///
    /// Triggers this state does not handle are resolved by the superstate.
    pub fn substate_of(self, superstate: S) -> Result<Self, ConfigError> {
        self.registry.set_superstate(&self.state, &superstate)?;
        Ok(self)
    }

    fn add(self, trigger: T, behaviour: Behaviour<S, T>) -> Result<Self, ConfigError> {
        self.registry
            .ensure(&self.state)
            .add_behaviour(trigger, behaviour)?;
        Ok(self)
    }

    fn push_entry(self, from: Option<T>, action: Action<S, T>) -> Self {
        self.registry
            .ensure(&self.state)
            .entry_actions
            .push(EntryAction { from, action });
        self
    }
}

/// Wrap a callback over decoded parameters as a plain action.
fn typed<S, T, A, F>(action: F) -> Action<S, T>
where
    S: State,
    T: Trigger,
    A: ParameterList,
    F: Fn(A, &Transition<S, T>) + Send + Sync + 'static,
{
    Arc::new(move |transition: &Transition<S, T>| {
        match A::from_parameters(&transition.parameters) {
            Some(args) => action(args, transition),
            None => warn!(
                trigger = transition.trigger.name(),
                parameters = %transition.parameters,
                "parameters do not match the bound handle, callback skipped"
            ),
        }
    })
}
