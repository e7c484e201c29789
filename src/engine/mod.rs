//! Transition engine.
//!
//! Resolves fired triggers against the state hierarchy and carries them
//! out: exit actions, state mutation, entry actions, then observers.
//!
//! # Firing model
//!
//! - `fire` is synchronous and runs to completion before returning
//! - Callbacks cannot reach the machine; follow-up triggers go through a
//!   [`FireQueue`] and are drained in FIFO order once the current fire
//!   completes
//! - Errors are returned to the caller of `fire`, never retried

mod error;
mod machine;
mod queue;

pub use error::FireError;
pub use machine::{StateMachine, UnhandledTriggerHandler};
pub use queue::FireQueue;
