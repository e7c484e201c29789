//! Topology introspection.
//!
//! Read-only views of a machine's configuration for renderers and
//! diagnostics. Nothing here affects live transitions.
//!
//! # Example
//!
//! ```rust
//! use switchboard::{state_enum, trigger_enum, StateMachine};
//!
//! state_enum! {
//!     enum Call { Ringing, Connected, OnHold }
//! }
//! trigger_enum! {
//!     enum Event { Answer, Hold }
//! }
//!
//! let mut machine = StateMachine::new(Call::Ringing);
//! machine.configure(Call::Ringing).permit(Event::Answer, Call::Connected)?;
//! machine
//!     .configure(Call::OnHold)
//!     .substate_of(Call::Connected)?;
//! machine.configure(Call::Connected).permit(Event::Hold, Call::OnHold)?;
//!
//! let description = machine.describe();
//! let connected = description.state(&Call::Connected).unwrap();
//! assert_eq!(connected.substates, vec![Call::OnHold]);
//! assert!(machine.lint().is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod description;
mod lint;

pub use description::{
    EntryActionDescription, StateDescription, TopologyDescription, TransitionDescription,
    TriggerDescription,
};
pub use lint::{lint, TopologyIssue};

use crate::core::{State, Trigger};
use crate::engine::StateMachine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Snapshot the configured topology.
    pub fn describe(&self) -> TopologyDescription<S, T> {
        TopologyDescription::capture(self.registry(), self.initial_state())
    }

    /// Check the configured topology for unreachable or unused parts.
    pub fn lint(&self) -> Validation<(), NonEmptyVec<TopologyIssue>> {
        lint(&self.describe())
    }
}
