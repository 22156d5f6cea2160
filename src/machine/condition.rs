use super::Jump;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

/// A single comparison: `{Variable: <path>, <operator>: <value>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub variable: String,
    pub operator: String,
    pub value: Value,
}

/// The logical wrapper a choice branch may put around its condition.
/// Only one wrapper is allowed per branch; they never nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    Not,
    And,
    Or,
}

impl Combinator {
    /// The DSL key introducing this wrapper, in lookup order.
    pub const ALL: [Combinator; 3] = [Combinator::Not, Combinator::Or, Combinator::And];

    pub fn dsl_key(self) -> &'static str {
        match self {
            Combinator::Not => "not",
            Combinator::And => "and",
            Combinator::Or => "or",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            Combinator::Not => "Not",
            Combinator::And => "And",
            Combinator::Or => "Or",
        }
    }
}

/// One branch of a Choice state: a condition and where to go when it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRule {
    pub combinator: Option<Combinator>,
    pub condition: Condition,
    pub target: Jump,
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Variable", &self.variable)?;
        map.serialize_entry(&self.operator, &self.value)?;
        map.end()
    }
}

impl Serialize for ChoiceRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self.combinator {
            Some(combinator) => map.serialize_entry(combinator.field_name(), &self.condition)?,
            None => {
                map.serialize_entry("Variable", &self.condition.variable)?;
                map.serialize_entry(&self.condition.operator, &self.condition.value)?;
            }
        }
        self.target.serialize_into(&mut map)?;
        map.end()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.operator, self.value)
    }
}

impl fmt::Display for ChoiceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.combinator {
            Some(combinator) => write!(f, "{}({})", combinator.field_name(), self.condition)?,
            None => write!(f, "{}", self.condition)?,
        }
        write!(f, " -> {}", self.target)
    }
}
