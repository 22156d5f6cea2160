use super::{ChoiceRule, Invocation};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

/// Where execution goes once a state is done.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Jump {
    Next(String),
    End,
}

impl Jump {
    /// The reserved `goto` value meaning "stop here".
    pub const END_KEYWORD: &'static str = "End";

    /// Reads a DSL `goto` value.
    pub fn from_goto(goto: &str) -> Self {
        if goto == Self::END_KEYWORD {
            Jump::End
        } else {
            Jump::Next(goto.to_string())
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Jump::Next(name) => Some(name),
            Jump::End => None,
        }
    }

    pub(crate) fn serialize_into<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Jump::Next(name) => map.serialize_entry("Next", name),
            Jump::End => map.serialize_entry("End", &true),
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jump::Next(name) => f.write_str(name),
            Jump::End => f.write_str(Self::END_KEYWORD),
        }
    }
}

/// The kind-specific payload of a compiled state.
///
/// Every kind except `Choice` and `Succeed` carries a single `transition`, which stays
/// `None` until the linker (or an explicit `goto`) decides where execution continues.
#[derive(Debug, Clone, PartialEq)]
pub enum StateKind {
    Pass {
        result: Option<Value>,
        transition: Option<Jump>,
    },
    Succeed,
    Wait {
        seconds: u64,
        transition: Option<Jump>,
    },
    Task {
        invocation: Box<Invocation>,
        transition: Option<Jump>,
    },
    Choice {
        rules: Vec<ChoiceRule>,
        default: Option<String>,
    },
}

/// A compiled node of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub name: String,
    pub kind: StateKind,
}

impl State {
    pub fn pass(name: &str, result: Option<Value>) -> Self {
        Self {
            name: name.to_string(),
            kind: StateKind::Pass {
                result,
                transition: None,
            },
        }
    }

    pub fn succeed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: StateKind::Succeed,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            StateKind::Pass { .. } => "Pass",
            StateKind::Succeed => "Succeed",
            StateKind::Wait { .. } => "Wait",
            StateKind::Task { .. } => "Task",
            StateKind::Choice { .. } => "Choice",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, StateKind::Choice { .. })
    }

    /// The single outgoing transition, for kinds that have one.
    pub fn transition(&self) -> Option<&Jump> {
        match &self.kind {
            StateKind::Pass { transition, .. }
            | StateKind::Wait { transition, .. }
            | StateKind::Task { transition, .. } => transition.as_ref(),
            StateKind::Succeed | StateKind::Choice { .. } => None,
        }
    }

    /// Mutable access to the transition slot; `None` for kinds without one.
    pub fn transition_slot(&mut self) -> Option<&mut Option<Jump>> {
        match &mut self.kind {
            StateKind::Pass { transition, .. }
            | StateKind::Wait { transition, .. }
            | StateKind::Task { transition, .. } => Some(transition),
            StateKind::Succeed | StateKind::Choice { .. } => None,
        }
    }

    /// Every state name this state can hand execution to.
    pub fn targets(&self) -> Vec<&str> {
        match &self.kind {
            StateKind::Pass { transition, .. } | StateKind::Wait { transition, .. } => {
                transition.iter().filter_map(Jump::target).collect()
            }
            StateKind::Task {
                invocation,
                transition,
            } => transition
                .iter()
                .filter_map(Jump::target)
                .chain(invocation.catch.iter().map(|c| c.next.as_str()))
                .collect(),
            StateKind::Choice { rules, default } => rules
                .iter()
                .filter_map(|rule| rule.target.target())
                .chain(default.as_deref())
                .collect(),
            StateKind::Succeed => Vec::new(),
        }
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", self.type_name())?;
        match &self.kind {
            StateKind::Pass { result, transition } => {
                if let Some(result) = result {
                    map.serialize_entry("Result", result)?;
                }
                if let Some(jump) = transition {
                    jump.serialize_into(&mut map)?;
                }
            }
            StateKind::Succeed => {}
            StateKind::Wait {
                seconds,
                transition,
            } => {
                map.serialize_entry("Seconds", seconds)?;
                if let Some(jump) = transition {
                    jump.serialize_into(&mut map)?;
                }
            }
            StateKind::Task {
                invocation,
                transition,
            } => {
                map.serialize_entry("Resource", &invocation.resource)?;
                map.serialize_entry("InputPath", &invocation.input_path)?;
                map.serialize_entry("ResultPath", &invocation.result_path)?;
                map.serialize_entry("OutputPath", &invocation.output_path)?;
                map.serialize_entry("Parameters", &invocation.parameters)?;
                map.serialize_entry("Catch", &invocation.catch)?;
                if let Some(timeout) = invocation.timeout_seconds {
                    map.serialize_entry("TimeoutSeconds", &timeout)?;
                }
                if let Some(jump) = transition {
                    jump.serialize_into(&mut map)?;
                }
            }
            StateKind::Choice { rules, default } => {
                map.serialize_entry("Choices", rules)?;
                if let Some(default) = default {
                    map.serialize_entry("Default", default)?;
                }
            }
        }
        map.end()
    }
}
