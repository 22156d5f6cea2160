//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the stepwright
//! crate, so a caller can load, compile and emit workflows with a single import.
//!
//! # Example
//!
//! ```rust,no_run
//! use stepwright::prelude::*;
//!
//! # fn run_example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let locator = SourceLocator::new("flows");
//! let sources = ["billing", "reminder"]
//!     .into_iter()
//!     .map(|name| WorkflowSource::new(name, locator.load(name)));
//!
//! let compiled = compile_batch(&Compiler::default(), sources)?;
//! let machines = compiled.iter().map(|c| &c.machine);
//! write_documents(&mut std::io::stdout(), machines, OutputFormat::Yaml)?;
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::batch::{CompiledWorkflow, WorkflowSource, compile_batch};
pub use crate::compiler::{Compiler, CompilerBuilder, parsing::ActionParser};
pub use crate::config::CompilerConfig;

// Loading and emitting
pub use crate::dsl::{Action, SourceLocator, WorkflowDocument, load_file, load_str};
pub use crate::emit::{OutputFormat, render, write_documents};

// Compiled model
pub use crate::machine::{ChoiceRule, Combinator, Condition, Jump, State, StateKind, StateMachine};

// Error types
pub use crate::error::{BatchError, CompileError, EmitError};
