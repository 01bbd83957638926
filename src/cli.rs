//! CLI argument parsing for slidecat.
//!
//! This module defines the command-line interface using `clap`. Exactly one of
//! `--convert` or `--merge` selects the action; the positional arguments mean
//! different things for each:
//!
//! ```text
//! slidecat --convert [--parallel] <file-or-pattern>... <output_directory>
//! slidecat --merge <output_pdf> <file-or-pattern>...
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use slidecat::cli::Cli;
//! use slidecat::config::Config;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = Config::try_from(&cli).expect("Invalid configuration");
//! ```

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::{
    Action, CONVERTER_ENV, Config, ConvertConfig, ConverterConfig, DEFAULT_WORKERS,
    ExecutionMode, MergeConfig, OrderSource,
};
use crate::error::{Result, SlideCatError};
use crate::resolve::InputSpec;

const AFTER_HELP: &str = "\
Examples:
  slidecat --convert deck1.pptx deck2.pptx pdfs/
  slidecat --convert --parallel \"talks/*.pptx\" pdfs/
  slidecat --merge book.pdf chapter1.pdf chapter2.pdf
  slidecat --merge book.pdf \"chapters/*.pdf\" --order 3,1-2";

/// Convert presentations to PDF and merge PDFs.
///
/// Conversion shells out to LibreOffice (`soffice`) once per file. Merging
/// concatenates PDFs in the resolved order or an order chosen at a prompt.
#[derive(Parser, Debug)]
#[command(name = "slidecat")]
#[command(version)]
#[command(about = "Convert presentations to PDF and merge PDFs", long_about = None)]
#[command(after_help = AFTER_HELP)]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("action").required(true).args(["convert", "merge"])))]
pub struct Cli {
    /// Convert .pptx files to PDF
    ///
    /// Positional arguments: one or more files or a single glob pattern,
    /// followed by the output directory.
    #[arg(long)]
    pub convert: bool,

    /// Merge PDF files into one
    ///
    /// Positional arguments: the output PDF, followed by the files or glob
    /// patterns to merge.
    #[arg(long)]
    pub merge: bool,

    /// Run conversions concurrently
    #[arg(long, requires = "convert", conflicts_with = "merge")]
    pub parallel: bool,

    /// Number of concurrent conversions with --parallel
    #[arg(short, long, value_name = "N", requires = "parallel", conflicts_with = "merge")]
    pub jobs: Option<usize>,

    /// Path to the soffice executable
    ///
    /// Defaults to the platform's usual LibreOffice location, or `soffice`
    /// on PATH.
    #[arg(long, value_name = "PATH", env = CONVERTER_ENV)]
    pub soffice: Option<PathBuf>,

    /// Merge order, answering the order prompt (e.g. "3,1-2")
    ///
    /// Positions are 1-indexed; ranges use `-` or `:`. An empty value keeps
    /// the resolved order.
    #[arg(
        long,
        value_name = "SELECTION",
        requires = "merge",
        conflicts_with = "convert",
        allow_hyphen_values = true
    )]
    pub order: Option<String>,

    /// Dry run - show what would be done without converting or writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show per-file detail and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Input files, patterns and the output location
    #[arg(required = true, value_name = "ARGS", num_args = 1..)]
    pub args: Vec<String>,
}

impl Cli {
    /// Validate CLI arguments before building a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if fewer than two positional arguments were
    /// given.
    pub fn validate(&self) -> Result<()> {
        if self.args.len() < 2 {
            let usage = if self.convert {
                "slidecat --convert <file-or-pattern>... <output_directory>"
            } else {
                "slidecat --merge <output_pdf> <file-or-pattern>..."
            };
            return Err(SlideCatError::invalid_config(format!("Usage: {usage}")));
        }

        Ok(())
    }

    fn converter(&self) -> ConverterConfig {
        self.soffice
            .clone()
            .map(ConverterConfig::new)
            .unwrap_or_default()
    }

    fn execution_mode(&self) -> ExecutionMode {
        if self.parallel {
            ExecutionMode::Parallel {
                workers: self.jobs.unwrap_or(DEFAULT_WORKERS),
            }
        } else {
            ExecutionMode::Sequential
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = SlideCatError;

    fn try_from(cli: &Cli) -> Result<Self> {
        cli.validate()?;

        let action = if cli.convert {
            let mut inputs = cli.args.clone();
            // validate() guarantees at least two entries.
            let output_dir = PathBuf::from(inputs.pop().unwrap_or_default());

            Action::Convert(ConvertConfig {
                inputs: InputSpec::from_args(inputs),
                output_dir,
                mode: cli.execution_mode(),
                converter: cli.converter(),
            })
        } else {
            let (output, inputs) = cli
                .args
                .split_first()
                .ok_or_else(|| SlideCatError::invalid_config("No output file given"))?;

            Action::Merge(MergeConfig {
                inputs: InputSpec::Paths(inputs.to_vec()),
                output: PathBuf::from(output),
                order: cli
                    .order
                    .clone()
                    .map(OrderSource::Preset)
                    .unwrap_or_default(),
            })
        };

        let config = Config {
            action,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            quiet: cli.quiet,
        };

        config.validate().map_err(|e| {
            SlideCatError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
