use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while compiling a single workflow document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("The source for the workflow should be found at '{path}'")]
    DocumentNotFound { path: String },

    #[error("The content of the workflow seems to be empty")]
    EmptyDocument,

    #[error("Actions list cannot be empty")]
    EmptyActionList,

    #[error("The key {field} is missing for {context}")]
    MissingField { field: String, context: String },

    #[error("The key {field} has an invalid value for {context}: expected {expected}")]
    InvalidField {
        field: String,
        expected: String,
        context: String,
    },

    #[error("Undefined type of action for {0}")]
    UnrecognizedAction(String),

    #[error("A route was already defined for action '{0}'")]
    ConflictingRoute(String),

    #[error("No route defined for action '{0}'")]
    MissingRoute(String),

    #[error("The key goto is missing for {0}")]
    MissingGoto(String),

    #[error("State '{0}' is defined more than once")]
    DuplicateState(String),

    #[error("State '{state}' jumps to '{target}', which is not a defined state")]
    UnknownTarget { state: String, target: String },

    #[error("Failed to parse workflow document: {0}")]
    Parse(String),

    #[error("Failed to read workflow document '{path}': {message}")]
    Io { path: String, message: String },
}

impl CompileError {
    pub(crate) fn missing(field: &str, context: impl fmt::Display) -> Self {
        CompileError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, expected: &str, context: impl fmt::Display) -> Self {
        CompileError::InvalidField {
            field: field.to_string(),
            expected: expected.to_string(),
            context: context.to_string(),
        }
    }
}

/// Errors raised while rendering compiled documents to an output stream.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not write to the output stream: {0}")]
    Io(#[from] std::io::Error),
}

/// One failing workflow inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowFailure {
    pub name: String,
    pub error: CompileError,
}

/// Aggregated failure of a batch: every workflow that did not compile, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    pub failures: Vec<WorkflowFailure>,
}

impl BatchError {
    /// Names of the failing workflows, in declaration order.
    pub fn failed_names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self
            .failures
            .iter()
            .map(|failure| format!("Error in {}: {}", failure.name, failure.error))
            .join("\n");
        f.write_str(&report)
    }
}

impl std::error::Error for BatchError {}
