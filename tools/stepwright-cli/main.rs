use clap::{Parser, ValueEnum};
use stepwright::config::{DEFAULT_RESOURCE_PREFIX, DEFAULT_VERSION};
use stepwright::dsl::loader::DEFAULT_EXTENSION;
use stepwright::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Json,
    Yaml,
}

impl From<FormatCli> for OutputFormat {
    fn from(format: FormatCli) -> Self {
        match format {
            FormatCli::Json => OutputFormat::Json,
            FormatCli::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Compile workflow DSL files into state machine documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Workflows to compile; every workflow file in the project directory when omitted
    names: Vec<String>,

    /// Directory holding the workflow sources
    #[arg(short = 'd', long, env = "STEPWRIGHT_PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    /// Extension of the workflow sources
    #[arg(short, long, env = "STEPWRIGHT_EXTENSION", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Only compile this workflow
    #[arg(long)]
    biz: Option<String>,

    /// Write the documents to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format of the documents
    #[arg(short, long, value_enum, default_value = "json")]
    format: FormatCli,

    /// Value of the `Version` field of every document
    #[arg(long, env = "STEPWRIGHT_VERSION", default_value = DEFAULT_VERSION)]
    version_tag: String,

    /// Prefix turning a service name into the invoked resource identifier
    #[arg(long, env = "STEPWRIGHT_RESOURCE_PREFIX", default_value = DEFAULT_RESOURCE_PREFIX)]
    resource_prefix: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stepwright=info,warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let locator = SourceLocator::new(&cli.project_dir).with_extension(&cli.extension);
    let mut names = if cli.names.is_empty() {
        locator
            .discover()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to list workflows: {}", e)))
    } else {
        cli.names.clone()
    };
    if let Some(biz) = &cli.biz {
        names.retain(|name| name == biz);
    }
    if names.is_empty() {
        exit_with_error(&format!(
            "No workflow defined in '{}'",
            cli.project_dir.display()
        ));
    }

    let compiler = Compiler::builder()
        .with_version(&cli.version_tag)
        .with_resource_prefix(&cli.resource_prefix)
        .build();

    let sources = names.iter().map(|name| {
        debug!(workflow = %name, path = %locator.path_for(name).display(), "queued workflow");
        WorkflowSource::new(name.as_str(), locator.load(name))
    });

    let compiled = match compile_batch(&compiler, sources) {
        Ok(compiled) => compiled,
        Err(batch) => {
            for failure in &batch.failures {
                eprintln!("Error in {}: {}", failure.name, failure.error);
            }
            std::process::exit(1);
        }
    };

    let machines = compiled.iter().map(|c| &c.machine);
    let written = match &cli.output {
        Some(path) => {
            let file = File::create(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not create '{}': {}", path.display(), e))
            });
            write_documents(&mut BufWriter::new(file), machines, cli.format.into())
        }
        None => write_documents(&mut io::stdout().lock(), machines, cli.format.into()),
    };
    if let Err(e) = written {
        exit_with_error(&format!("Failed to write documents: {}", e));
    }

    info!(
        workflows = compiled.len(),
        elapsed = ?start.elapsed(),
        "compilation finished"
    );
}

fn exit_with_error(message: &str) -> ! {
    let _ = io::stdout().flush();
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
