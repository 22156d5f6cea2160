//! Wires the implicit edges between consecutive states.
//!
//! All functions here are pure over the node slice: the graph builder compiles every
//! node first and only then hands the sequence to the linker.

use crate::machine::{Jump, State, StateKind};
use tracing::warn;

/// What `link` did to the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A `Next` edge was added.
    Linked,
    /// A Choice got its `Default` from the fallthrough.
    Defaulted,
    /// A Choice already had an explicit `Default`; the fallthrough was dropped.
    Shadowed,
    /// The previous state already had a transition, or cannot have one.
    Untouched,
}

/// Gives `previous` an edge to `next` unless it already has one. First write wins.
pub fn link(previous: &mut State, next: &str) -> LinkOutcome {
    if let StateKind::Choice { default, .. } = &mut previous.kind {
        return match default {
            Some(existing) => {
                warn!(
                    choice = %previous.name,
                    default = %existing,
                    fallthrough = %next,
                    "explicit default shadows the fallthrough to the next state"
                );
                LinkOutcome::Shadowed
            }
            None => {
                *default = Some(next.to_string());
                LinkOutcome::Defaulted
            }
        };
    }

    match previous.transition_slot() {
        Some(slot) if slot.is_none() => {
            *slot = Some(Jump::Next(next.to_string()));
            LinkOutcome::Linked
        }
        _ => LinkOutcome::Untouched,
    }
}

/// Links every state of `states` to its successor.
pub fn link_sequence(states: &mut [State]) {
    for i in 1..states.len() {
        let (head, tail) = states.split_at_mut(i);
        link(&mut head[i - 1], &tail[0].name);
    }
}

/// Ends the sequence at `last` unless it already jumps somewhere.
///
/// Choice states are never terminal: they keep their rules and default.
pub fn terminate(last: &mut State) -> bool {
    match last.transition_slot() {
        Some(slot) if slot.is_none() => {
            *slot = Some(Jump::End);
            true
        }
        _ => false,
    }
}
