use crate::error::CompileError;
use serde_json::{Map, Value};
use std::fmt;

/// A read-only view over one raw DSL entry (an action, a choice branch, a `tech` block, ...).
///
/// All field lookups report failures against the rendered entry, so error messages
/// point at the offending fragment of the source document.
#[derive(Debug, Clone, Copy)]
pub struct Action<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Action<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps any DSL value, failing if it is not a mapping.
    pub fn from_value(
        value: &'a Value,
        field: &str,
        context: impl fmt::Display,
    ) -> Result<Self, CompileError> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| CompileError::invalid(field, "a mapping", context))
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    pub fn require(&self, key: &str) -> Result<&'a Value, CompileError> {
        self.get(key).ok_or_else(|| CompileError::missing(key, self))
    }

    pub fn str_field(&self, key: &str) -> Result<Option<&'a str>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| CompileError::invalid(key, "a string", self)),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str, CompileError> {
        self.str_field(key)?
            .ok_or_else(|| CompileError::missing(key, self))
    }

    pub fn u64_field(&self, key: &str) -> Result<Option<u64>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| CompileError::invalid(key, "a non-negative integer", self)),
        }
    }

    pub fn nested(&self, key: &str) -> Result<Action<'a>, CompileError> {
        Action::from_value(self.require(key)?, key, self)
    }

    /// The state name this action compiles to.
    pub fn name(&self) -> Result<&'a str, CompileError> {
        self.require_str("name")
    }

    /// The explicit jump declared on this entry, if any.
    pub fn goto(&self) -> Result<Option<&'a str>, CompileError> {
        self.str_field("goto")
    }

    /// The action's name when present, otherwise the rendered entry.
    pub fn label(&self) -> String {
        match self.fields.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self.fields) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str("<unprintable action>"),
        }
    }
}

/// A loaded workflow source: top-level keys `comment`, `states` and `catch`.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowDocument<'a> {
    root: Action<'a>,
}

impl<'a> WorkflowDocument<'a> {
    pub const STATES_KEY: &'static str = "states";
    pub const CATCH_KEY: &'static str = "catch";
    pub const COMMENT_KEY: &'static str = "comment";

    /// Rejects documents that parsed to nothing or to something other than a mapping.
    pub fn new(document: &'a Value) -> Result<Self, CompileError> {
        match document {
            Value::Null => Err(CompileError::EmptyDocument),
            Value::Object(fields) if fields.is_empty() => Err(CompileError::EmptyDocument),
            Value::Array(items) if items.is_empty() => Err(CompileError::EmptyDocument),
            Value::String(text) if text.is_empty() => Err(CompileError::EmptyDocument),
            Value::Object(fields) => Ok(Self {
                root: Action::new(fields),
            }),
            other => Err(CompileError::invalid("document", "a mapping", other)),
        }
    }

    pub fn comment(&self) -> Result<Option<&'a str>, CompileError> {
        self.root.str_field(Self::COMMENT_KEY)
    }

    pub fn states(&self) -> Result<&'a [Value], CompileError> {
        let states = self.root.require(Self::STATES_KEY)?;
        Self::action_list(states, Self::STATES_KEY)
    }

    /// The catch branch, or `None` when the document declares no `catch` key.
    pub fn catch(&self) -> Result<Option<&'a [Value]>, CompileError> {
        match self.root.get(Self::CATCH_KEY) {
            None => Ok(None),
            Some(actions) => Self::action_list(actions, Self::CATCH_KEY).map(Some),
        }
    }

    // A key present with no value (`catch:`) is an empty list, not a type error.
    fn action_list(value: &'a Value, key: &str) -> Result<&'a [Value], CompileError> {
        match value {
            Value::Null => Ok(&[]),
            Value::Array(actions) => Ok(actions.as_slice()),
            other => Err(CompileError::invalid(key, "a sequence of actions", other)),
        }
    }
}
