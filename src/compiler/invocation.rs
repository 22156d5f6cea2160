use crate::config::CompilerConfig;
use crate::dsl::Action;
use crate::error::CompileError;
use crate::machine::{
    CALL_TYPE, CAUGHT_ERRORS, CatchClause, ContentType, Headers, HttpMethod, Invocation,
    Parameters, RequestContext,
};
use serde_json::Value;

const ACCEPT_ENCODING: &str = "gzip,deflate";

/// Builds the call descriptor of a Task state from its `tech` block.
pub(super) fn build_invocation(
    action: &Action<'_>,
    name: &str,
    config: &CompilerConfig,
) -> Result<Invocation, CompileError> {
    let tech = action.nested("tech")?;
    let service = tech.require_str("service")?;

    Ok(Invocation {
        resource: config.resource_for(service),
        input_path: "$".to_string(),
        result_path: format!("$.{}.result", slug(name)),
        output_path: "$".to_string(),
        parameters: build_parameters(action, &tech)?,
        catch: CAUGHT_ERRORS
            .iter()
            .map(|error| CatchClause::new(error, &config.fallback_state))
            .collect(),
        timeout_seconds: tech.u64_field("timeout")?,
    })
}

fn build_parameters(action: &Action<'_>, tech: &Action<'_>) -> Result<Parameters, CompileError> {
    let (method, route) = route_of(action, tech)?;
    let declared_form_data = tech.get("form-data").filter(|v| !v.is_null());
    let content_type = if declared_form_data.is_some() {
        ContentType::FormData
    } else {
        ContentType::Json
    };

    Ok(Parameters {
        call_type: CALL_TYPE.to_string(),
        resource: route.to_string(),
        path: route.to_string(),
        request_context: RequestContext {
            resource_path: route.to_string(),
            http_method: method,
        },
        query_parameters: tech.get("query_params").cloned(),
        path_parameters: tech.get("uri_params").cloned(),
        headers: Headers {
            accept_encoding: ACCEPT_ENCODING.to_string(),
            content_type,
        },
        body: non_empty(tech.get("body")),
        form_data: non_empty(declared_form_data),
        stage_variables: None,
    })
}

/// Finds the single declared route. Declaring both verbs is as wrong as declaring none.
fn route_of<'a>(
    action: &Action<'_>,
    tech: &Action<'a>,
) -> Result<(HttpMethod, &'a str), CompileError> {
    let mut found = None;
    for method in [HttpMethod::Get, HttpMethod::Post] {
        let Some(route) = tech.str_field(method.dsl_key())? else {
            continue;
        };
        if found.is_some() {
            return Err(CompileError::ConflictingRoute(action.label()));
        }
        found = Some((method, route));
    }
    found.ok_or_else(|| CompileError::MissingRoute(action.label()))
}

// Null, empty strings and empty collections are sent as null.
fn non_empty(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.clone()),
    }
}

/// `"Send Invoice"` becomes `"send_invoice"`.
pub(super) fn slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_joins_words_and_lowercases() {
        assert_eq!(slug("Send  Invoice To Client"), "send_invoice_to_client");
        assert_eq!(slug("check"), "check");
    }

    #[test]
    fn empty_values_become_null() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(&Value::String(String::new()))), None);
        assert_eq!(
            non_empty(Some(&serde_json::json!({"a": 1}))),
            Some(serde_json::json!({"a": 1}))
        );
    }
}
