//! Static checks over a topology snapshot.
//!
//! Uses Stillwater's `Validation` to report every finding in one pass
//! instead of stopping at the first.

use super::description::{TopologyDescription, TransitionDescription};
use crate::core::{State, Trigger};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A configuration that is valid but cannot behave as written.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TopologyIssue {
    #[error("Entry action on '{state}' is bound to trigger '{trigger}', which never enters that state")]
    UnreachableEntryAction { state: String, trigger: String },

    #[error("Trigger '{trigger}' declares parameters but nothing handles it")]
    UnusedParameterizedTrigger { trigger: String },
}

type Check = Validation<(), NonEmptyVec<TopologyIssue>>;

/// Check a snapshot, accumulating ALL issues.
pub fn lint<S: State, T: Trigger>(description: &TopologyDescription<S, T>) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    for state in &description.states {
        for entry in &state.entry_actions {
            let Some(trigger) = &entry.from_trigger else {
                continue;
            };
            let check = if enters(description, &state.state, trigger) {
                Validation::success(())
            } else {
                Validation::fail(TopologyIssue::UnreachableEntryAction {
                    state: state.state.name().to_string(),
                    trigger: trigger.name().to_string(),
                })
            };
            checks.push(check);
        }
    }

    for declared in &description.triggers {
        let check = if handled(description, &declared.trigger) {
            Validation::success(())
        } else {
            Validation::fail(TopologyIssue::UnusedParameterizedTrigger {
                trigger: declared.trigger.name().to_string(),
            })
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Some transition fired by `trigger` enters `target` from outside it,
/// or reenters it.
fn enters<S: State, T: Trigger>(description: &TopologyDescription<S, T>, target: &S, trigger: &T) -> bool {
    description.states.iter().any(|source| {
        source.transitions.iter().any(|t| match t {
            TransitionDescription::External {
                trigger: fired,
                destination,
                ..
            } => {
                fired == trigger
                    && description.is_within(destination, target)
                    && !description.is_within(&source.state, target)
            }
            TransitionDescription::Reentry { trigger: fired } => {
                fired == trigger && &source.state == target
            }
            _ => false,
        })
    })
}

fn handled<S: State, T: Trigger>(description: &TopologyDescription<S, T>, trigger: &T) -> bool {
    description
        .states
        .iter()
        .any(|state| state.transitions.iter().any(|t| t.trigger() == trigger))
}
