use super::builder::SequenceBuilder;
use crate::error::CompileError;
use crate::machine::State;
use serde_json::Value;

/// Produces the reserved fallback state every Task error edge points to.
///
/// Without a catch branch the fallback simply succeeds. With one, it becomes a Pass
/// state leading into the compiled catch actions, which follow it in the result.
pub(super) fn inject(
    builder: &SequenceBuilder<'_>,
    fallback_name: &str,
    catch: Option<&[Value]>,
) -> Result<Vec<State>, CompileError> {
    let Some(actions) = catch else {
        return Ok(vec![State::succeed(fallback_name)]);
    };

    let mut entry = State::pass(fallback_name, None);
    let branch = builder.build(&mut entry, actions)?;

    let mut states = Vec::with_capacity(branch.len() + 1);
    states.push(entry);
    states.extend(branch);
    Ok(states)
}
