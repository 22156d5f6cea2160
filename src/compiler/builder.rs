use super::Compiler;
use super::linker::{link, link_sequence, terminate};
use crate::dsl::Action;
use crate::error::CompileError;
use crate::machine::State;
use serde_json::Value;
use tracing::debug;

/// Turns an ordered action list into a linked run of states hanging off an anchor.
pub(super) struct SequenceBuilder<'a> {
    compiler: &'a Compiler,
}

impl<'a> SequenceBuilder<'a> {
    pub(super) fn new(compiler: &'a Compiler) -> Self {
        Self { compiler }
    }

    /// Compiles `actions` and links them after `anchor`.
    ///
    /// Every action is compiled before any edge is drawn. The anchor then falls through to
    /// the first state, each state to its successor, and the last state ends the machine
    /// unless it already jumps elsewhere.
    pub(super) fn build(
        &self,
        anchor: &mut State,
        actions: &[Value],
    ) -> Result<Vec<State>, CompileError> {
        if actions.is_empty() {
            return Err(CompileError::EmptyActionList);
        }

        let mut states = actions
            .iter()
            .map(|raw| match raw.as_object() {
                Some(fields) => self.compiler.compile_action(&Action::new(fields)),
                None => Err(CompileError::UnrecognizedAction(raw.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        link(anchor, &states[0].name);
        link_sequence(&mut states);
        if let Some(last) = states.last_mut() {
            if terminate(last) {
                debug!(state = %last.name, "last state of the sequence ends the machine");
            }
        }

        Ok(states)
    }
}
