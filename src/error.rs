//! Error types for slidecat.
//!
//! Errors fall into two groups. Per-file errors (a missing input, a file
//! with the wrong extension, a converter run that failed) are recoverable:
//! the file is skipped and the batch continues. Resolution-level and
//! write-level errors abort the whole invocation.

use std::io;
use std::path::PathBuf;

use crate::selection::SelectionError;

/// Result type alias for slidecat operations.
pub type Result<T> = std::result::Result<T, SlideCatError>;

/// Main error type for slidecat operations.
#[derive(Debug, thiserror::Error)]
pub enum SlideCatError {
    /// Input file vanished between resolution and use.
    #[error("File '{}' does not exist", .path.display())]
    MissingInputFile {
        /// Path of the missing file.
        path: PathBuf,
    },

    /// Input did not carry the extension the operation needs.
    #[error("Skipping file '{}' - invalid file type (expected .{expected})", .path.display())]
    InvalidFileType {
        /// Rejected path.
        path: PathBuf,
        /// Extension that was expected, without the dot.
        expected: &'static str,
    },

    /// The external converter exited unsuccessfully or could not be started.
    #[error("Error converting {}: {reason}", .path.display())]
    ExternalProcessFailure {
        /// Source file being converted.
        path: PathBuf,
        /// Exit status and captured stderr.
        reason: String,
    },

    /// The user-supplied merge order could not be parsed.
    #[error(transparent)]
    InvalidOrderSelection(#[from] SelectionError),

    /// Nothing survived the extension filter.
    #[error("No valid .{extension} files found")]
    NoValidFiles {
        /// Extension that was required, without the dot.
        extension: &'static str,
    },

    /// Fewer files than the operation needs survived the extension filter.
    #[error("You need at least {required} valid PDF files to merge (found {found})")]
    InsufficientFiles {
        /// Files that passed the filter.
        found: usize,
        /// Minimum needed.
        required: usize,
    },

    /// Converter executable could not be located.
    #[error(
        "Converter not found: {}\n  Hint: install LibreOffice or point --soffice / SLIDECAT_SOFFICE at the soffice binary",
        .program.display()
    )]
    ConverterNotFound {
        /// Configured converter path or name.
        program: PathBuf,
    },

    /// Failed to load a PDF for merging.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Writing the merged document failed.
    #[error("Error during merging: failed to write {}\n  Reason: {source}", .path.display())]
    MergeWriteError {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A glob pattern could not be parsed.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// A conversion worker task died.
    #[error("Conversion worker failed: {reason}")]
    WorkerFailed {
        /// Join error description.
        reason: String,
    },

    /// Invalid configuration or command-line usage.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for SlideCatError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl SlideCatError {
    /// Create a MissingInputFile error.
    pub fn missing_input(path: PathBuf) -> Self {
        Self::MissingInputFile { path }
    }

    /// Create an InvalidFileType error.
    pub fn invalid_file_type(path: PathBuf, expected: &'static str) -> Self {
        Self::InvalidFileType { path, expected }
    }

    /// Create an ExternalProcessFailure error.
    pub fn process_failure(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::ExternalProcessFailure {
            path,
            reason: reason.into(),
        }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error only affects a single file (or the order prompt)
    /// and the operation can carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingInputFile { .. }
                | Self::InvalidFileType { .. }
                | Self::ExternalProcessFailure { .. }
                | Self::InvalidOrderSelection(_)
        )
    }

    /// Check if this error must terminate the invocation.
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get the process exit code for this error.
    ///
    /// Every error that reaches `main` exits with status 1, the same status
    /// as a usage error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
