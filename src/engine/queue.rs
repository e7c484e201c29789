//! Deferred fires requested from inside callbacks.

use crate::core::{ParameterList, Parameters, Trigger};
use crate::topology::TriggerWithParameters;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FIFO of triggers waiting to be fired on a machine.
///
/// Callbacks cannot reach the machine that runs them. A callback that
/// needs to fire a follow-up trigger captures a clone of the machine's
/// queue (see [`StateMachine::fire_queue`]) and enqueues it. The machine
/// drains the queue after the current fire completes, one trigger at a
/// time, each to completion.
///
/// [`StateMachine::fire_queue`]: crate::engine::StateMachine::fire_queue
pub struct FireQueue<T: Trigger> {
    pending: Arc<Mutex<VecDeque<(T, Parameters)>>>,
}

impl<T: Trigger> FireQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Enqueue a trigger without parameters.
    pub fn fire(&self, trigger: T) {
        self.fire_parameters(trigger, Parameters::new());
    }

    /// Enqueue a parameterized trigger.
    pub fn fire_with<A: ParameterList>(&self, trigger: &TriggerWithParameters<T, A>, args: A) {
        self.fire_parameters(trigger.trigger().clone(), args.into_parameters());
    }

    /// Enqueue a trigger with runtime-checked parameters.
    pub fn fire_parameters(&self, trigger: T, parameters: Parameters) {
        self.lock().push_back((trigger, parameters));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn pop(&self) -> Option<(T, Parameters)> {
        self.lock().pop_front()
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    // A panicking callback cannot leave the deque half-written.
    fn lock(&self) -> MutexGuard<'_, VecDeque<(T, Parameters)>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Trigger> Clone for FireQueue<T> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestTrigger {
        First,
        Second,
    }

    impl Trigger for TestTrigger {
        fn name(&self) -> &str {
            match self {
                Self::First => "First",
                Self::Second => "Second",
            }
        }
    }

    #[test]
    fn queue_is_fifo() {
        let queue = FireQueue::new();
        queue.fire(TestTrigger::First);
        queue.fire(TestTrigger::Second);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|(t, _)| t), Some(TestTrigger::First));
        assert_eq!(queue.pop().map(|(t, _)| t), Some(TestTrigger::Second));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn clones_share_the_same_queue() {
        let queue = FireQueue::new();
        let handle = queue.clone();
        handle.fire(TestTrigger::First);

        assert!(!queue.is_empty());
        queue.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn parameterized_fire_keeps_values() {
        let queue = FireQueue::new();
        let trigger = TriggerWithParameters::<TestTrigger, (i32,)>::new(TestTrigger::Second);
        queue.fire_with(&trigger, (11,));

        let (_, parameters) = queue.pop().unwrap();
        assert_eq!(parameters.get::<i32>(0), Some(&11));
    }
}
