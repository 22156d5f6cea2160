use crate::error::CompileError;
use crate::machine::State;
use ahash::AHashSet;
use itertools::Itertools;

/// Checks that state names are unique and that every edge lands on a known state.
pub(super) fn check_graph(states: &[State]) -> Result<(), CompileError> {
    if let Some(duplicate) = states.iter().map(|s| s.name.as_str()).duplicates().next() {
        return Err(CompileError::DuplicateState(duplicate.to_string()));
    }

    let known: AHashSet<&str> = states.iter().map(|s| s.name.as_str()).collect();
    for state in states {
        if let Some(target) = state.targets().into_iter().find(|t| !known.contains(t)) {
            return Err(CompileError::UnknownTarget {
                state: state.name.clone(),
                target: target.to_string(),
            });
        }
    }
    Ok(())
}
