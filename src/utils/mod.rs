//! Utilities for path collection and display.

use crate::{Result, error::SlideCatError};
use glob::MatchOptions;
use std::path::{Path, PathBuf};

/// Characters that mark an input argument as a glob pattern.
const WILDCARDS: [char; 2] = ['*', '?'];

/// Check whether an argument should be expanded as a glob pattern.
pub fn has_wildcard(arg: &str) -> bool {
    arg.contains(WILDCARDS)
}

/// Check whether a path ends with `.{extension}`, ignoring ASCII case.
///
/// The comparison is on the whole name, so `archive.PDF` matches `pdf` and a
/// file literally named `pdf` does not.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let name = path.to_string_lossy().to_ascii_lowercase();
    name.ends_with(&format!(".{}", extension.to_ascii_lowercase()))
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pptx"`
/// - `"./decks/week?.pptx"`
///
/// Matches come back in the glob crate's (alphabetical) order. Wildcards do
/// not match a leading `.`, so hidden files are only found by a pattern that
/// spells the dot out. Entries that cannot be read while walking are logged
/// and skipped.
///
/// Errors:
/// - `InvalidPattern` when the pattern does not parse.
pub fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let pattern = pattern.as_ref();
    let mut resolved_paths = Vec::new();

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let paths = glob::glob_with(pattern, options).map_err(|err| SlideCatError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })?;

    for entry in paths {
        match entry {
            Ok(path) => resolved_paths.push(path),
            Err(err) => log::warn!("skipping unreadable match for '{pattern}': {err}"),
        }
    }

    log::debug!("pattern '{pattern}' matched {} path(s)", resolved_paths.len());

    Ok(resolved_paths)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
