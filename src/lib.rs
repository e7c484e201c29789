//! Switchboard: a hierarchical state machine engine
//!
//! Switchboard drives a finite state machine whose states can be nested.
//! A trigger that a state does not handle is resolved by its superstate,
//! and transitions run exit and entry actions only for the levels of the
//! hierarchy that are actually left or entered.
//!
//! # Core Concepts
//!
//! - **State / Trigger**: consumer-supplied identifiers via the `State` and
//!   `Trigger` traits (or the `state_enum!` / `trigger_enum!` macros)
//! - **Configuration**: per-state permits, internal transitions, entry and
//!   exit actions, and superstate links
//! - **Parameterized triggers**: triggers declared with a typed tuple of
//!   parameters, fired and received through a `TriggerWithParameters` handle
//! - **Introspection**: a serializable snapshot of the configured topology
//!
//! # Example
//!
//! ```rust
//! use switchboard::{state_enum, trigger_enum, FireError, StateMachine};
//! use std::sync::{Arc, Mutex};
//!
//! state_enum! {
//!     enum Call { OffHook, Ringing, Connected, OnHold }
//! }
//! trigger_enum! {
//!     enum Event { Dial, Answer, Hold, Hangup }
//! }
//!
//! let callee = Arc::new(Mutex::new(String::new()));
//! let mut machine = StateMachine::new(Call::OffHook);
//! let dial = machine.set_trigger_parameters::<(String,)>(Event::Dial)?;
//!
//! machine.configure(Call::OffHook).permit(Event::Dial, Call::Ringing)?;
//! let sink = Arc::clone(&callee);
//! machine
//!     .configure(Call::Ringing)
//!     .on_entry_from(&dial, move |(number,), _| *sink.lock().unwrap() = number)?
//!     .permit(Event::Answer, Call::Connected)?;
//! machine
//!     .configure(Call::Connected)
//!     .permit(Event::Hold, Call::OnHold)?
//!     .permit(Event::Hangup, Call::OffHook)?;
//! machine.configure(Call::OnHold).substate_of(Call::Connected)?;
//!
//! machine.fire_with(&dial, ("12345".to_string(),))?;
//! machine.fire(Event::Answer)?;
//! machine.fire(Event::Hold)?;
//! assert_eq!(*callee.lock().unwrap(), "12345");
//! assert!(machine.is_in_state(&Call::Connected));
//!
//! // OnHold inherits Hangup from Connected
//! machine.fire(Event::Hangup)?;
//! assert_eq!(machine.state(), &Call::OffHook);
//!
//! assert!(matches!(
//!     machine.fire(Event::Hold),
//!     Err(FireError::InvalidTransition { .. })
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod introspection;
pub mod topology;

// Re-export commonly used types
pub use builder::{ConfigError, StateConfiguration};
pub use crate::core::{Guard, Parameters, State, Transition, TransitionKind, Trigger};
pub use engine::{FireError, FireQueue, StateMachine};
pub use introspection::{TopologyDescription, TopologyIssue};
pub use topology::TriggerWithParameters;
