use crate::compiler::Compiler;
use crate::error::{BatchError, CompileError, WorkflowFailure};
use crate::machine::StateMachine;
use ahash::AHashSet;
use serde_json::Value;
use tracing::warn;

/// A named workflow waiting to be compiled, as handed over by the loader.
///
/// A source that failed to load still takes part in the batch so that its failure is
/// reported next to its siblings'.
#[derive(Debug, Clone)]
pub struct WorkflowSource {
    pub name: String,
    pub document: Result<Value, CompileError>,
}

impl WorkflowSource {
    pub fn new(name: impl Into<String>, document: Result<Value, CompileError>) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledWorkflow {
    pub name: String,
    pub machine: StateMachine,
}

/// Compiles every source, in order, and fails only once all of them were attempted.
///
/// A name seen twice is compiled once, on its first occurrence.
pub fn compile_batch<I>(
    compiler: &Compiler,
    sources: I,
) -> Result<Vec<CompiledWorkflow>, BatchError>
where
    I: IntoIterator<Item = WorkflowSource>,
{
    let mut seen = AHashSet::new();
    let mut compiled = Vec::new();
    let mut failures = Vec::new();

    for source in sources {
        if !seen.insert(source.name.clone()) {
            continue;
        }
        let result = source
            .document
            .and_then(|document| compiler.compile(&source.name, &document));
        match result {
            Ok(machine) => compiled.push(CompiledWorkflow {
                name: source.name,
                machine,
            }),
            Err(error) => {
                warn!(workflow = %source.name, %error, "workflow failed to compile");
                failures.push(WorkflowFailure {
                    name: source.name,
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(compiled)
    } else {
        Err(BatchError { failures })
    }
}
