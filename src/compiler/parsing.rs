use super::condition::build_rule;
use super::invocation::build_invocation;
use crate::config::CompilerConfig;
use crate::dsl::Action;
use crate::error::CompileError;
use crate::machine::{Jump, State, StateKind};

/// Defines the contract for turning one kind of DSL action into a `State`.
///
/// The kind is recognised by the presence of `discriminator()` among the action's keys.
pub trait ActionParser: Send + Sync {
    fn discriminator(&self) -> &str;
    fn parse(&self, action: &Action<'_>, config: &CompilerConfig) -> Result<State, CompileError>;
}

/// `choices:` - a conditional branch.
pub struct ChoiceParser;

impl ActionParser for ChoiceParser {
    fn discriminator(&self) -> &str {
        "choices"
    }

    fn parse(&self, action: &Action<'_>, _config: &CompilerConfig) -> Result<State, CompileError> {
        let name = action.name()?;
        let branches = action
            .require("choices")?
            .as_array()
            .ok_or_else(|| CompileError::invalid("choices", "a sequence of branches", action))?;

        let rules = branches
            .iter()
            .map(|branch| build_rule(&Action::from_value(branch, "choices", action)?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(State {
            name: name.to_string(),
            kind: StateKind::Choice {
                rules,
                default: action.str_field("default")?.map(str::to_string),
            },
        })
    }
}

/// `tech:` - a call to a micro-service route.
pub struct TaskParser;

impl ActionParser for TaskParser {
    fn discriminator(&self) -> &str {
        "tech"
    }

    fn parse(&self, action: &Action<'_>, config: &CompilerConfig) -> Result<State, CompileError> {
        let name = action.name()?;
        let invocation = build_invocation(action, name, config)?;
        Ok(State {
            name: name.to_string(),
            kind: StateKind::Task {
                invocation: Box::new(invocation),
                transition: action.goto()?.map(Jump::from_goto),
            },
        })
    }
}

/// `wait:` - a pause of a fixed number of seconds.
pub struct WaitParser;

impl ActionParser for WaitParser {
    fn discriminator(&self) -> &str {
        "wait"
    }

    fn parse(&self, action: &Action<'_>, _config: &CompilerConfig) -> Result<State, CompileError> {
        let name = action.name()?;
        // The engine only takes whole seconds, so fractional waits are refused here.
        let seconds = action.require("wait")?.as_u64().ok_or_else(|| {
            CompileError::invalid("wait", "a whole number of seconds, not a fraction", action)
        })?;
        Ok(State {
            name: name.to_string(),
            kind: StateKind::Wait {
                seconds,
                transition: action.goto()?.map(Jump::from_goto),
            },
        })
    }
}

/// The built-in parsers, in the order their discriminators are tried.
pub(super) fn default_parsers() -> Vec<Box<dyn ActionParser>> {
    vec![
        Box::new(ChoiceParser),
        Box::new(TaskParser),
        Box::new(WaitParser),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn parse_with(parser: &dyn ActionParser, value: &Value) -> Result<State, CompileError> {
        let action = Action::new(value.as_object().unwrap());
        parser.parse(&action, &CompilerConfig::default())
    }

    #[test]
    fn wait_keeps_seconds_and_goto() {
        let state = parse_with(&WaitParser, &json!({"name": "pause", "wait": 5, "goto": "End"}))
            .unwrap();
        assert_eq!(
            state.kind,
            StateKind::Wait {
                seconds: 5,
                transition: Some(Jump::End)
            }
        );
    }

    #[test]
    fn wait_rejects_non_numeric_duration() {
        let err = parse_with(&WaitParser, &json!({"name": "pause", "wait": "soon"})).unwrap_err();
        assert!(matches!(err, CompileError::InvalidField { ref field, .. } if field == "wait"));
    }

    #[test]
    fn wait_rejects_fractional_duration() {
        let err = parse_with(&WaitParser, &json!({"name": "pause", "wait": 1.5})).unwrap_err();
        match err {
            CompileError::InvalidField { field, expected, .. } => {
                assert_eq!(field, "wait");
                assert!(expected.contains("whole number of seconds"));
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn choice_keeps_branch_order_and_default() {
        let state = parse_with(
            &ChoiceParser,
            &json!({
                "name": "route",
                "choices": [
                    {"var": "$.a", "oper": "BooleanEquals", "value": true, "goto": "A"},
                    {"or": {"var": "$.b", "oper": "IsPresent", "value": true}, "goto": "B"}
                ],
                "default": "C"
            }),
        )
        .unwrap();
        let StateKind::Choice { rules, default } = state.kind else {
            panic!("Expected a Choice state");
        };
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].target, Jump::Next("A".to_string()));
        assert_eq!(rules[1].target, Jump::Next("B".to_string()));
        assert_eq!(default.as_deref(), Some("C"));
    }

    #[test]
    fn unnamed_action_is_rejected() {
        let err = parse_with(&WaitParser, &json!({"wait": 1})).unwrap_err();
        assert!(matches!(err, CompileError::MissingField { ref field, .. } if field == "name"));
    }
}
