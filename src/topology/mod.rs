//! State topology: per-state configuration, the superstate hierarchy and
//! parameterized trigger declarations.
//!
//! The registry is pure data plus validation. It never runs callbacks;
//! the engine reads it to resolve and execute transitions.

mod registry;
mod representation;
mod triggers;

pub(crate) use registry::{Resolution, TopologyRegistry};
pub(crate) use representation::{Behaviour, EntryAction};
pub use representation::Action;
pub use triggers::TriggerWithParameters;
