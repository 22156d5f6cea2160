use crate::error::EmitError;
use crate::machine::StateMachine;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Line written between two consecutive documents of a batch.
pub const DOCUMENT_SEPARATOR: &str = "---";

/// How compiled documents are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON, two-space indentation.
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Renders a single document, without trailing newline.
pub fn render(machine: &StateMachine, format: OutputFormat) -> Result<String, EmitError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(machine)?,
        OutputFormat::Yaml => serde_yaml::to_string(machine)?,
    };
    Ok(rendered.trim_end().to_string())
}

/// Writes documents to `out` in the given order, separated by `---` lines.
pub fn write_documents<'a, W, I>(
    out: &mut W,
    machines: I,
    format: OutputFormat,
) -> Result<(), EmitError>
where
    W: Write,
    I: IntoIterator<Item = &'a StateMachine>,
{
    for (idx, machine) in machines.into_iter().enumerate() {
        if idx > 0 {
            writeln!(out, "{}", DOCUMENT_SEPARATOR)?;
        }
        writeln!(out, "{}", render(machine, format)?)?;
    }
    out.flush()?;
    Ok(())
}
