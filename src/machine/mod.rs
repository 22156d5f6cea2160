//! The compiled state machine: typed states and their serialized shape.

mod condition;
mod state;
mod task;

pub use condition::{ChoiceRule, Combinator, Condition};
pub use state::{Jump, State, StateKind};
pub use task::{
    CALL_TYPE, CAUGHT_ERRORS, CatchClause, ContentType, Headers, HttpMethod, Invocation,
    Parameters, RequestContext,
};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One complete workflow document, frozen once compiled.
///
/// States keep the order in which the compiler produced them, so the serialized
/// document is stable from one compilation to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachine {
    pub version: String,
    pub comment: String,
    pub start_at: String,
    pub states: Vec<State>,
}

impl StateMachine {
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

struct StatesByName<'a>(&'a [State]);

impl Serialize for StatesByName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for state in self.0 {
            map.serialize_entry(&state.name, state)?;
        }
        map.end()
    }
}

impl Serialize for StateMachine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("Version", &self.version)?;
        map.serialize_entry("Comment", &self.comment)?;
        map.serialize_entry("StartAt", &self.start_at)?;
        map.serialize_entry("States", &StatesByName(&self.states))?;
        map.end()
    }
}
