// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use elements_docs_validator::{
    DEFAULT_DOCS_DIR, DEFAULT_PATTERN, DEFAULT_SCHEMA_PATH, HarnessConfig, ValidationReport,
    output, validate_docs,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// Validate API Elements examples in markdown documentation.
#[derive(Debug, Parser)]
#[command(name = "elements-docs-validator", version)]
struct Cli {
    /// Base directory for relative paths
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory containing the documentation files
    #[arg(long, default_value = DEFAULT_DOCS_DIR)]
    docs_dir: PathBuf,

    /// Element schema (JSON Schema)
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Glob pattern for documentation files inside the docs directory
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// File to skip; repeat for several. Replaces the default (docs/migration.md)
    #[arg(long = "exclude", value_name = "PATH")]
    exclude: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn harness_config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default().with_root(&self.root);
        config.docs_dir.clone_from(&self.docs_dir);
        config.schema_path.clone_from(&self.schema);
        config.pattern.clone_from(&self.pattern);
        if !self.exclude.is_empty() {
            config.excluded.clone_from(&self.exclude);
        }
        config
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => output::write_json(report, &mut out)?,
        OutputFormat::Human => {
            output::write_human(report, &mut out)?;
            let verdict = if report.ok {
                "PASSED".green().bold()
            } else {
                "FAILED".red().bold()
            };
            writeln!(out, "{verdict}")?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let report = match validate_docs(&cli.harness_config()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    if let Err(e) = print_report(&report, cli.format) {
        eprintln!("Error: {e:#}");
        std::process::exit(2);
    }

    if !report.ok {
        std::process::exit(1);
    }
}
