//! A single presentation-to-PDF conversion.
//!
//! Each job runs the external converter once:
//!
//! ```text
//! soffice --headless --convert-to pdf --outdir <dir> <file>
//! ```
//!
//! The converter writes `<dir>/<file stem>.pdf`. Per-file problems (the
//! source vanished, the converter exited non-zero) come back as
//! [`FileOutcome::Skipped`] so the rest of the batch carries on.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::config::ConverterConfig;
use crate::error::{Result, SlideCatError};

/// One source file and the directory its PDF goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Presentation to convert.
    pub source: PathBuf,
    /// Directory handed to the converter as `--outdir`.
    pub output_dir: PathBuf,
}

impl ConversionJob {
    /// Create a job for `source` writing into `output_dir`.
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Path of the PDF the converter is expected to produce.
    pub fn expected_output(&self) -> PathBuf {
        let mut name = self
            .source
            .file_stem()
            .map(|stem| stem.to_os_string())
            .unwrap_or_default();
        name.push(".pdf");
        self.output_dir.join(name)
    }
}

/// Result of one conversion job.
#[derive(Debug)]
pub enum FileOutcome {
    /// The converter succeeded.
    Converted {
        /// Presentation that was converted.
        source: PathBuf,
        /// PDF the converter was asked to write.
        output: PathBuf,
    },
    /// The file was skipped; the batch continued.
    Skipped {
        /// Presentation that was skipped.
        source: PathBuf,
        /// Why it was skipped.
        error: SlideCatError,
    },
}

impl FileOutcome {
    /// Source file of the job.
    pub fn source(&self) -> &Path {
        match self {
            Self::Converted { source, .. } | Self::Skipped { source, .. } => source,
        }
    }

    /// True for [`FileOutcome::Converted`].
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// Runs the external converter. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    /// Converter executable, located on first use.
    program: OnceCell<PathBuf>,
}

impl Converter {
    /// Create a converter for `config`. Nothing is checked until the first job.
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            program: OnceCell::new(),
        }
    }

    /// Locate the converter executable, caching the answer.
    ///
    /// # Errors
    ///
    /// Returns `ConverterNotFound` if the executable does not exist.
    pub async fn program(&self) -> Result<&Path> {
        let program = self
            .program
            .get_or_try_init(|| async { self.config.locate() })
            .await?;
        Ok(program.as_path())
    }

    /// Convert one file.
    ///
    /// The source is checked for existence right before the converter is
    /// started; a missing source is skipped without touching the converter.
    ///
    /// # Errors
    ///
    /// Only batch-fatal problems are returned as `Err` (the converter itself
    /// cannot be found). Everything file-specific is a
    /// [`FileOutcome::Skipped`].
    pub async fn convert(&self, job: &ConversionJob) -> Result<FileOutcome> {
        if !job.source.exists() {
            return Ok(FileOutcome::Skipped {
                source: job.source.clone(),
                error: SlideCatError::missing_input(job.source.clone()),
            });
        }

        let program = self.program().await?;

        log::debug!(
            "running {} --headless --convert-to pdf --outdir {} {}",
            program.display(),
            job.output_dir.display(),
            job.source.display()
        );

        let output = Command::new(program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(&job.output_dir)
            .arg(&job.source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                return Ok(FileOutcome::Skipped {
                    source: job.source.clone(),
                    error: SlideCatError::process_failure(
                        job.source.clone(),
                        format!("failed to start {}: {err}", program.display()),
                    ),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |code| code.to_string());

            return Ok(FileOutcome::Skipped {
                source: job.source.clone(),
                error: SlideCatError::process_failure(
                    job.source.clone(),
                    format!("converter exited with status {code}: {}", stderr.trim()),
                ),
            });
        }

        log::trace!("converter stdout: {}", String::from_utf8_lossy(&output.stdout).trim());

        Ok(FileOutcome::Converted {
            source: job.source.clone(),
            output: job.expected_output(),
        })
    }
}
