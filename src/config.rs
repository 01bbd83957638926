//! Configuration module for slidecat.
//!
//! This module holds the validated, normalized configuration that drives a
//! run. It is built from the parsed command line (see [`crate::cli::Cli`]) and
//! handles:
//! - Routing to the convert or merge action
//! - Selection of the execution mode for conversion
//! - Location of the external converter
//! - Validation of argument combinations

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::error::SlideCatError;
use crate::resolve::InputSpec;

/// Worker slots used by parallel conversion unless `--jobs` says otherwise.
pub const DEFAULT_WORKERS: usize = 4;

/// Environment variable that overrides the converter location.
pub const CONVERTER_ENV: &str = "SLIDECAT_SOFFICE";

/// Converter used when neither `--soffice` nor the environment names one.
#[cfg(target_os = "macos")]
pub const DEFAULT_CONVERTER: &str = "/Applications/LibreOffice.app/Contents/MacOS/soffice";

/// Converter used when neither `--soffice` nor the environment names one.
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_CONVERTER: &str = "soffice";

/// How conversion jobs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One converter process at a time, in resolved order.
    #[default]
    Sequential,
    /// A fixed pool of worker slots, one converter process each.
    Parallel {
        /// Number of worker slots.
        workers: usize,
    },
}

impl ExecutionMode {
    /// Number of converter processes that may run at once.
    pub fn concurrency(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel { workers } => *workers,
        }
    }
}

/// Location of the external office-document converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Path to, or bare name of, the converter executable.
    pub program: PathBuf,
}

impl ConverterConfig {
    /// Create a converter config for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find the converter executable.
    ///
    /// A program given as a path must point at an existing file. A bare name
    /// is looked up in the directories listed in `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ConverterNotFound` if the executable cannot be found.
    pub fn locate(&self) -> crate::Result<PathBuf> {
        let program = &self.program;

        let found = if program.components().count() > 1 || program.is_absolute() {
            program.is_file().then(|| program.clone())
        } else {
            search_path(program)
        };

        found.ok_or_else(|| SlideCatError::ConverterNotFound {
            program: program.clone(),
        })
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

fn search_path(program: &Path) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Where the merge order comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderSource {
    /// Ask the user on the terminal (or read a line from stdin).
    #[default]
    Prompt,
    /// Use this response instead of asking.
    Preset(String),
}

/// Settings for converting presentations to PDF.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Presentations to convert.
    pub inputs: InputSpec,
    /// Directory the converter writes PDFs into.
    pub output_dir: PathBuf,
    /// Sequential or pooled execution.
    pub mode: ExecutionMode,
    /// External converter location.
    pub converter: ConverterConfig,
}

/// Settings for merging PDFs.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// PDFs to merge.
    pub inputs: InputSpec,
    /// Merged output file.
    pub output: PathBuf,
    /// Where the merge order comes from.
    pub order: OrderSource,
}

/// The operation requested on the command line.
#[derive(Debug, Clone)]
pub enum Action {
    /// Convert presentations to PDF.
    Convert(ConvertConfig),
    /// Merge PDFs into one.
    Merge(MergeConfig),
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requested operation.
    pub action: Action,

    /// Dry run mode - report the plan without converting or writing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The worker count is zero
    /// - The conversion output directory is an existing file
    /// - The merge output is also one of the literal inputs
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        match &self.action {
            Action::Convert(convert) => {
                if let ExecutionMode::Parallel { workers } = convert.mode
                    && workers == 0
                {
                    bail!("Number of jobs must be at least 1");
                }

                if convert.output_dir.is_file() {
                    bail!(
                        "Output directory is an existing file: {}",
                        convert.output_dir.display()
                    );
                }
            }
            Action::Merge(merge) => {
                for input in merge.inputs.literals() {
                    if Path::new(input) == merge.output {
                        bail!(
                            "Output file cannot be the same as an input file: {}",
                            merge.output.display()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
