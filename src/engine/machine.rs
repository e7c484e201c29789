//! State machine that resolves and executes fired triggers.

use crate::builder::{ConfigError, StateConfiguration};
use crate::core::{ParameterList, ParameterType, Parameters, State, Transition, TransitionKind, Trigger};
use crate::engine::error::FireError;
use crate::engine::queue::FireQueue;
use crate::topology::{Action, Behaviour, Resolution, TopologyRegistry, TriggerWithParameters};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler run instead of failing when no state handles a trigger.
pub type UnhandledTriggerHandler<S, T> = Box<dyn Fn(&S, &T) + Send + Sync>;

/// What a resolved trigger will do, detached from the registry borrow.
enum Plan<S: State, T: Trigger> {
    Internal(Action<S, T>),
    External(S),
    Reentry(S),
}

/// Hierarchical state machine.
///
/// The machine owns its current state and its configuration. `fire` runs
/// synchronously to completion and takes `&mut self`; share a machine
/// across threads behind a lock.
///
/// Callbacks never see the machine. Triggers fired from callbacks go
/// through the [`FireQueue`] and are drained, in order, after the fire
/// that ran the callback completes.
///
/// # Example
///
/// ```rust
/// use switchboard::{state_enum, trigger_enum, StateMachine};
///
/// state_enum! {
///     enum Lamp { Off, On }
/// }
/// trigger_enum! {
///     enum Switch { Flip }
/// }
///
/// let mut machine = StateMachine::new(Lamp::Off);
/// machine.configure(Lamp::Off).permit(Switch::Flip, Lamp::On)?;
/// machine.configure(Lamp::On).permit(Switch::Flip, Lamp::Off)?;
///
/// machine.fire(Switch::Flip)?;
/// assert_eq!(machine.state(), &Lamp::On);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StateMachine<S: State, T: Trigger> {
    current: S,
    initial: S,
    registry: TopologyRegistry<S, T>,
    observers: Vec<Action<S, T>>,
    unhandled: Option<UnhandledTriggerHandler<S, T>>,
    queue: FireQueue<T>,
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a new state machine in the initial state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial.clone(),
            initial,
            registry: TopologyRegistry::new(),
            observers: Vec::new(),
            unhandled: None,
            queue: FireQueue::new(),
        }
    }

    /// Get current state
    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Begin configuring `state`, creating its record if needed.
    pub fn configure(&mut self, state: S) -> StateConfiguration<'_, S, T> {
        StateConfiguration::new(&mut self.registry, state)
    }

    /// Declare the parameter shape `A` of `trigger`.
    ///
    /// A trigger can be declared once. Afterwards it must be fired with
    /// exactly these parameters.
    pub fn set_trigger_parameters<A: ParameterList>(
        &mut self,
        trigger: T,
    ) -> Result<TriggerWithParameters<T, A>, ConfigError> {
        self.registry.triggers.declare(trigger)
    }

    /// Register a callback run after every completed transition,
    /// including internal ones.
    pub fn on_transitioned<F>(&mut self, callback: F)
    where
        F: Fn(&Transition<S, T>) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(callback));
    }

    /// Run `handler` instead of returning [`FireError::InvalidTransition`].
    pub fn on_unhandled_trigger<F>(&mut self, handler: F)
    where
        F: Fn(&S, &T) + Send + Sync + 'static,
    {
        self.unhandled = Some(Box::new(handler));
    }

    /// Handle for firing triggers from inside callbacks.
    pub fn fire_queue(&self) -> FireQueue<T> {
        self.queue.clone()
    }

    /// True if the current state is `state` or one of its substates.
    pub fn is_in_state(&self, state: &S) -> bool {
        self.registry.is_within(&self.current, state)
    }

    /// True if `trigger`, fired without parameters, would be handled.
    ///
    /// Always false for triggers declared with parameters; use
    /// [`can_fire_with`](Self::can_fire_with) for those.
    pub fn can_fire(&self, trigger: &T) -> bool {
        if self.registry.triggers.takes_parameters(trigger) {
            return false;
        }
        self.handles(trigger, &Parameters::new())
    }

    /// True if firing `trigger` with `args` would be handled.
    pub fn can_fire_with<A: ParameterList>(
        &self,
        trigger: &TriggerWithParameters<T, A>,
        args: A,
    ) -> bool {
        let parameters = args.into_parameters();
        self.registry.triggers.accepts(trigger.trigger(), &parameters)
            && self.handles(trigger.trigger(), &parameters)
    }

    fn handles(&self, trigger: &T, parameters: &Parameters) -> bool {
        matches!(
            self.registry.resolve(&self.current, trigger, parameters),
            Resolution::Handled { .. }
        )
    }

    /// Triggers handled by the current state or its ancestors, innermost
    /// first.
    ///
    /// Guards of parameterless triggers are evaluated without parameters.
    /// Triggers declared with parameters are listed whenever some level
    /// configures them; their guards are not evaluated.
    pub fn permitted_triggers(&self) -> Vec<T> {
        let mut permitted: Vec<T> = Vec::new();
        for state in self.registry.ancestry(&self.current) {
            let Some(rep) = self.registry.get(&state) else {
                continue;
            };
            for entry in &rep.behaviours {
                if permitted.contains(&entry.trigger) {
                    continue;
                }
                if self.registry.triggers.takes_parameters(&entry.trigger)
                    || self.can_fire(&entry.trigger)
                {
                    permitted.push(entry.trigger.clone());
                }
            }
        }
        permitted
    }

    /// Fire a trigger that carries no parameters.
    pub fn fire(&mut self, trigger: T) -> Result<(), FireError> {
        self.fire_parameters(trigger, Parameters::new())
    }

    /// Fire a parameterized trigger.
    pub fn fire_with<A: ParameterList>(
        &mut self,
        trigger: &TriggerWithParameters<T, A>,
        args: A,
    ) -> Result<(), FireError> {
        self.fire_parameters(trigger.trigger().clone(), args.into_parameters())
    }

    /// Fire a trigger with parameters checked at runtime against its
    /// declaration.
    ///
    /// Once the trigger completes, any triggers queued by its callbacks are
    /// fired in order. The first queued failure clears the rest of the
    /// queue and is returned.
    pub fn fire_parameters(&mut self, trigger: T, parameters: Parameters) -> Result<(), FireError> {
        self.execute(trigger, parameters)?;
        self.drain_queue()
    }

    fn drain_queue(&mut self) -> Result<(), FireError> {
        while let Some((trigger, parameters)) = self.queue.pop() {
            if let Err(error) = self.execute(trigger, parameters) {
                warn!(%error, "queued trigger failed, discarding remaining queue");
                self.queue.clear();
                return Err(error);
            }
        }
        Ok(())
    }

    fn execute(&mut self, trigger: T, parameters: Parameters) -> Result<(), FireError> {
        debug!(
            state = self.current.name(),
            trigger = trigger.name(),
            parameters = %parameters,
            "firing trigger"
        );

        if !self.registry.triggers.accepts(&trigger, &parameters) {
            return Err(FireError::Arity {
                trigger: trigger.name().to_string(),
                expected: self
                    .registry
                    .triggers
                    .expected(&trigger)
                    .iter()
                    .map(ParameterType::name)
                    .collect(),
                actual: parameters.types().iter().map(ParameterType::name).collect(),
            });
        }

        let plan = match self.registry.resolve(&self.current, &trigger, &parameters) {
            Resolution::Handled { state, behaviour } => match behaviour {
                Behaviour::Ignore => {
                    debug!(state = state.name(), trigger = trigger.name(), "trigger ignored");
                    return Ok(());
                }
                Behaviour::Internal { action } => Plan::Internal(Arc::clone(action)),
                Behaviour::Transition { destination, .. } => Plan::External(destination.clone()),
                Behaviour::Reentry => Plan::Reentry(state.clone()),
            },
            Resolution::Unhandled { unmet_guards } => {
                if let Some(handler) = &self.unhandled {
                    handler(&self.current, &trigger);
                    return Ok(());
                }
                return Err(FireError::InvalidTransition {
                    state: self.current.name().to_string(),
                    trigger: trigger.name().to_string(),
                    unmet_guards,
                });
            }
        };

        match plan {
            Plan::Internal(action) => {
                let transition = Transition::new(
                    self.current.clone(),
                    self.current.clone(),
                    trigger,
                    parameters,
                    TransitionKind::Internal,
                );
                action(&transition);
                self.notify(&transition);
            }
            Plan::External(destination) => {
                self.transition_to(destination, trigger, parameters, TransitionKind::External)
            }
            Plan::Reentry(state) => {
                self.transition_to(state, trigger, parameters, TransitionKind::Reentry)
            }
        }
        Ok(())
    }

    fn transition_to(&mut self, destination: S, trigger: T, parameters: Parameters, kind: TransitionKind) {
        let source = self.current.clone();
        let (exited, entered) = self.route(&source, &destination, kind);
        let transition = Transition::new(source, destination, trigger, parameters, kind);

        for state in &exited {
            if let Some(rep) = self.registry.get(state) {
                for action in &rep.exit_actions {
                    action(&transition);
                }
            }
        }

        self.current = transition.destination.clone();

        for state in &entered {
            if let Some(rep) = self.registry.get(state) {
                for action in rep.entry_actions_for(&transition.trigger) {
                    action(&transition);
                }
            }
        }

        self.notify(&transition);
        debug!(
            source = transition.source.name(),
            destination = transition.destination.name(),
            trigger = transition.trigger.name(),
            "transition completed"
        );
    }

    /// States to exit (innermost first) and to enter (outermost first).
    ///
    /// Exiting stops at the first level that contains the destination;
    /// entering stops above the first level that contains the source.
    /// A reentry exits up to and including the reentered state and enters
    /// only that state.
    fn route(&self, source: &S, destination: &S, kind: TransitionKind) -> (Vec<S>, Vec<S>) {
        if kind == TransitionKind::Reentry {
            let mut exited = Vec::new();
            for state in self.registry.ancestry(source) {
                let reached = &state == destination;
                exited.push(state);
                if reached {
                    break;
                }
            }
            return (exited, vec![destination.clone()]);
        }

        let exited = self
            .registry
            .ancestry(source)
            .into_iter()
            .take_while(|state| !self.registry.is_within(destination, state))
            .collect();
        let mut entered: Vec<S> = self
            .registry
            .ancestry(destination)
            .into_iter()
            .take_while(|state| !self.registry.is_within(source, state))
            .collect();
        entered.reverse();
        (exited, entered)
    }

    fn notify(&self, transition: &Transition<S, T>) {
        for observer in &self.observers {
            observer(transition);
        }
    }

    pub(crate) fn registry(&self) -> &TopologyRegistry<S, T> {
        &self.registry
    }
}
