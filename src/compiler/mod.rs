use crate::config::CompilerConfig;
use crate::dsl::{Action, WorkflowDocument};
use crate::error::CompileError;
use crate::machine::{State, StateMachine};
use serde_json::{Map, Value};
use tracing::{debug, info};

mod builder;
pub mod condition;
mod fallback;
mod invocation;
pub mod linker;
pub mod parsing;
mod validate;

use builder::SequenceBuilder;
use parsing::*;

/// Compiles workflow documents into state machines.
///
/// A compiler holds no per-document state, so one instance can compile any number of
/// workflows, in any order, with identical results.
pub struct Compiler {
    config: CompilerConfig,
    parsers: Vec<Box<dyn ActionParser>>,
}

pub struct CompilerBuilder {
    config: CompilerConfig,
    parsers: Vec<Box<dyn ActionParser>>,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            config: CompilerConfig::default(),
            parsers: default_parsers(),
        }
    }
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_initial_state(mut self, name: &str) -> Self {
        self.config.initial_state = name.to_string();
        self
    }
    pub fn with_fallback_state(mut self, name: &str) -> Self {
        self.config.fallback_state = name.to_string();
        self
    }
    pub fn with_version(mut self, version: &str) -> Self {
        self.config.version = version.to_string();
        self
    }
    pub fn with_resource_prefix(mut self, prefix: &str) -> Self {
        self.config.resource_prefix = prefix.to_string();
        self
    }
    /// Registers an extra action kind. Built-in kinds are tried first.
    pub fn with_custom_parser(mut self, parser: Box<dyn ActionParser>) -> Self {
        self.parsers.push(parser);
        self
    }
    pub fn build(self) -> Compiler {
        Compiler {
            config: self.config,
            parsers: self.parsers,
        }
    }
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles one workflow document into a complete state machine.
    ///
    /// The machine always starts with the initial Pass state, follows with the states
    /// compiled from `states`, and ends with the fallback state (and the compiled `catch`
    /// branch when the document declares one).
    pub fn compile(&self, name: &str, document: &Value) -> Result<StateMachine, CompileError> {
        let document = WorkflowDocument::new(document)?;
        let builder = SequenceBuilder::new(self);

        let mut initial = State::pass(&self.config.initial_state, Some(Value::Object(Map::new())));
        let main = builder.build(&mut initial, document.states()?)?;
        let fallback = fallback::inject(&builder, &self.config.fallback_state, document.catch()?)?;

        let mut states = Vec::with_capacity(main.len() + fallback.len() + 1);
        states.push(initial);
        states.extend(main);
        states.extend(fallback);

        validate::check_graph(&states)?;

        let comment = document.comment()?.unwrap_or(name).to_string();
        info!(workflow = %name, states = states.len(), "compiled workflow");

        Ok(StateMachine {
            version: self.config.version.clone(),
            comment,
            start_at: self.config.initial_state.clone(),
            states,
        })
    }

    /// Compiles a single action with the first parser whose discriminator it carries.
    pub(crate) fn compile_action(&self, action: &Action<'_>) -> Result<State, CompileError> {
        let parser = self
            .parsers
            .iter()
            .find(|p| action.has(p.discriminator()))
            .ok_or_else(|| CompileError::UnrecognizedAction(action.to_string()))?;

        let state = parser.parse(action, &self.config)?;
        debug!(state = %state.name, kind = state.type_name(), "compiled action");
        Ok(state)
    }
}
