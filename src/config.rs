/// Name of the reserved Pass state every document starts with.
pub const INITIAL_STATE_NAME: &str = "Init";

/// Name of the reserved state every Task error edge points to.
pub const ERROR_FALLBACK_STATE_NAME: &str = "MicroServiceErrorFallback";

pub const DEFAULT_VERSION: &str = "1.0";

/// Prefix turning a `tech.service` name into the invoked function identifier.
pub const DEFAULT_RESOURCE_PREFIX: &str = "arn:aws:lambda:eu-west-1:935392763270:function:";

/// The values the compiler would otherwise hard-code into every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub initial_state: String,
    pub fallback_state: String,
    pub version: String,
    pub resource_prefix: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            initial_state: INITIAL_STATE_NAME.to_string(),
            fallback_state: ERROR_FALLBACK_STATE_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
        }
    }
}

impl CompilerConfig {
    pub fn resource_for(&self, service: &str) -> String {
        format!("{}{}", self.resource_prefix, service)
    }
}
