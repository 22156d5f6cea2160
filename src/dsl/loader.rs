use crate::error::CompileError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_EXTENSION: &str = "yml";

/// Parses a workflow source into a document tree.
///
/// A source that holds nothing but blank lines and comments loads as `Null`, which
/// the compiler then reports as an empty document.
pub fn load_str(text: &str) -> Result<Value, CompileError> {
    let blank = text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    });
    if blank {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|e| CompileError::Parse(e.to_string()))
}

/// Reads and parses a workflow source file.
pub fn load_file(path: &Path) -> Result<Value, CompileError> {
    debug!(path = %path.display(), "loading workflow source");
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CompileError::DocumentNotFound {
            path: path.display().to_string(),
        },
        _ => CompileError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;
    load_str(&text)
}

/// Maps workflow names to their source files: `<project_dir>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    project_dir: PathBuf,
    extension: String,
}

impl SourceLocator {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.project_dir.join(format!("{}.{}", name, self.extension))
    }

    pub fn load(&self, name: &str) -> Result<Value, CompileError> {
        load_file(&self.path_for(name))
    }

    /// Lists every workflow in the project directory, sorted by name.
    pub fn discover(&self) -> Result<Vec<String>, CompileError> {
        let io_error = |e: std::io::Error| CompileError::Io {
            path: self.project_dir.display().to_string(),
            message: e.to_string(),
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.project_dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
