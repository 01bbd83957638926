//! Input resolution: turning command-line arguments into a filtered file set.
//!
//! Arguments are either a single glob pattern or a list mixing literal paths
//! and patterns. Literal paths are passed through untouched (they are checked
//! for existence only right before use), patterns are expanded with `glob`,
//! and everything is then filtered by the extension the operation needs.

use std::path::PathBuf;

use crate::error::{Result, SlideCatError};
use crate::output::OutputFormatter;
use crate::utils::{collect_paths_for_pattern, has_extension, has_wildcard};

/// What the user asked to operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A single glob pattern.
    Pattern(String),
    /// An ordered list of literal paths and patterns.
    Paths(Vec<String>),
}

impl InputSpec {
    /// Classify conversion arguments.
    ///
    /// Exactly one argument containing a wildcard is a [`InputSpec::Pattern`];
    /// anything else is a [`InputSpec::Paths`] list.
    pub fn from_args(mut args: Vec<String>) -> Self {
        if args.len() == 1 && has_wildcard(&args[0]) {
            Self::Pattern(args.remove(0))
        } else {
            Self::Paths(args)
        }
    }

    /// Expand patterns and pass literals through, keeping argument order.
    pub fn expand(&self) -> Result<Vec<PathBuf>> {
        match self {
            Self::Pattern(pattern) => collect_paths_for_pattern(pattern),
            Self::Paths(entries) => {
                let mut paths = Vec::with_capacity(entries.len());
                for entry in entries {
                    if has_wildcard(entry) {
                        paths.extend(collect_paths_for_pattern(entry)?);
                    } else {
                        paths.push(PathBuf::from(entry));
                    }
                }
                Ok(paths)
            }
        }
    }

    /// Literal (non-pattern) entries, in argument order.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        let entries: &[String] = match self {
            Self::Pattern(_) => &[],
            Self::Paths(entries) => entries,
        };
        entries
            .iter()
            .map(String::as_str)
            .filter(|entry| !has_wildcard(entry))
    }
}

/// The kind of file an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.pptx` presentations, input to conversion.
    Presentation,
    /// `.pdf` documents, input to merging.
    Pdf,
}

impl FileKind {
    /// Required extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Presentation => "pptx",
            Self::Pdf => "pdf",
        }
    }

    /// Smallest file set the operation accepts.
    pub fn minimum_files(self) -> usize {
        match self {
            Self::Presentation => 1,
            Self::Pdf => 2,
        }
    }
}

/// Outcome of resolving an [`InputSpec`] for one [`FileKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFiles {
    /// Kind the files were filtered for.
    pub kind: FileKind,
    /// Paths that passed the extension filter, in resolution order.
    pub files: Vec<PathBuf>,
    /// Paths dropped by the extension filter.
    pub rejected: Vec<PathBuf>,
}

impl ResolvedFiles {
    /// Split `paths` by extension.
    pub fn filter(paths: Vec<PathBuf>, kind: FileKind) -> Self {
        let (files, rejected) = paths
            .into_iter()
            .partition(|path| has_extension(path, kind.extension()));

        Self {
            kind,
            files,
            rejected,
        }
    }

    /// Fail unless enough files survived the filter.
    ///
    /// # Errors
    ///
    /// - `NoValidFiles` for conversion with nothing left
    /// - `InsufficientFiles` for a merge with fewer than two files
    pub fn require_minimum(&self) -> Result<()> {
        let required = self.kind.minimum_files();
        if self.files.len() >= required {
            return Ok(());
        }

        Err(match self.kind {
            FileKind::Presentation => SlideCatError::NoValidFiles {
                extension: self.kind.extension(),
            },
            FileKind::Pdf => SlideCatError::InsufficientFiles {
                found: self.files.len(),
                required,
            },
        })
    }
}

/// Resolve `spec` into the files of `kind` it names.
///
/// Rejected entries are reported through `formatter` and dropped. The
/// minimum-count check is applied before returning.
///
/// # Errors
///
/// Returns an error for malformed glob patterns or when too few files remain
/// (see [`ResolvedFiles::require_minimum`]).
pub fn resolve(
    spec: &InputSpec,
    kind: FileKind,
    formatter: &OutputFormatter,
) -> Result<ResolvedFiles> {
    let resolved = ResolvedFiles::filter(spec.expand()?, kind);

    for path in &resolved.rejected {
        formatter.error(&SlideCatError::invalid_file_type(path.clone(), kind.extension()).to_string());
    }

    log::debug!(
        "resolved {} {} file(s), rejected {}",
        resolved.files.len(),
        kind.extension(),
        resolved.rejected.len()
    );

    resolved.require_minimum()?;

    Ok(resolved)
}
