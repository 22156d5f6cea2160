use crate::dsl::Action;
use crate::error::CompileError;
use crate::machine::{ChoiceRule, Combinator, Condition, Jump};

/// Builds a comparison from a fragment holding `var`, `oper` and `value`.
pub fn build_condition(fragment: &Action<'_>) -> Result<Condition, CompileError> {
    let variable = fragment.require_str("var")?;
    let operator = fragment.require_str("oper")?;
    let value = fragment.require("value")?;
    Ok(Condition {
        variable: variable.to_string(),
        operator: operator.to_string(),
        value: value.clone(),
    })
}

/// Builds one branch of a Choice state.
///
/// The branch must declare where to jump. If it carries a `not`, `or` or `and` key, the
/// condition is read from that nested fragment; otherwise from the branch itself.
pub fn build_rule(branch: &Action<'_>) -> Result<ChoiceRule, CompileError> {
    let target = branch
        .goto()?
        .map(Jump::from_goto)
        .ok_or_else(|| CompileError::MissingGoto(branch.to_string()))?;

    match Combinator::ALL.into_iter().find(|c| branch.has(c.dsl_key())) {
        Some(combinator) => {
            let fragment = branch.nested(combinator.dsl_key())?;
            Ok(ChoiceRule {
                combinator: Some(combinator),
                condition: build_condition(&fragment)?,
                target,
            })
        }
        None => Ok(ChoiceRule {
            combinator: None,
            condition: build_condition(branch)?,
            target,
        }),
    }
}
