//! Identifier traits for states and triggers.
//!
//! States and triggers are opaque, comparable values supplied by the
//! consumer. The engine only needs to hash, compare, clone and name them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transition records and snapshots
/// - `Eq` + `Hash`: states key the configuration registry
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: topology snapshots are serializable
///
/// # Example
///
/// ```rust
/// use switchboard::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for the events that drive a state machine.
///
/// Same bounds as [`State`]; triggers key the per-state behaviour lists
/// and the parameter declarations.
pub trait Trigger:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the trigger's name for display/logging.
    fn name(&self) -> &str;
}
