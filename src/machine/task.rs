use serde::Serialize;
use serde_json::Value;

/// Marker the invoked micro-service uses to recognise a call coming from a state machine.
pub const CALL_TYPE: &str = "CWS_SFN";

/// Error names every Task state redirects to the fallback state.
pub const CAUGHT_ERRORS: [&str; 2] = ["BadRequestError", "States.TaskFailed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// The DSL key declaring a route for this method.
    pub fn dsl_key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentType {
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "multipart/form-data")]
    FormData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    #[serde(rename = "resourcePath")]
    pub resource_path: String,
    #[serde(rename = "httpMethod")]
    pub http_method: HttpMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headers {
    #[serde(rename = "Accept-Encoding")]
    pub accept_encoding: String,
    #[serde(rename = "Content-Type")]
    pub content_type: ContentType,
}

/// The request a Task state hands to the invoked service, shaped like a proxied HTTP event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    #[serde(rename = "type")]
    pub call_type: String,
    pub resource: String,
    pub path: String,
    #[serde(rename = "requestContext")]
    pub request_context: RequestContext,
    #[serde(rename = "multiValueQueryStringParameters")]
    pub query_parameters: Option<Value>,
    #[serde(rename = "pathParameters")]
    pub path_parameters: Option<Value>,
    pub headers: Headers,
    pub body: Option<Value>,
    #[serde(rename = "form-data")]
    pub form_data: Option<Value>,
    #[serde(rename = "stageVariables")]
    pub stage_variables: Option<Value>,
}

impl Parameters {
    pub fn method(&self) -> HttpMethod {
        self.request_context.http_method
    }

    pub fn content_type(&self) -> ContentType {
        self.headers.content_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatchClause {
    pub error_equals: Vec<String>,
    pub next: String,
}

impl CatchClause {
    pub fn new(error: &str, next: &str) -> Self {
        Self {
            error_equals: vec![error.to_string()],
            next: next.to_string(),
        }
    }
}

/// Everything a Task state needs to call a remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub resource: String,
    pub input_path: String,
    pub result_path: String,
    pub output_path: String,
    pub parameters: Parameters,
    pub catch: Vec<CatchClause>,
    pub timeout_seconds: Option<u64>,
}
