//! Writing the merged PDF.
//!
//! Output is written to a temporary sibling file and renamed into place, so
//! a failed write never leaves a truncated PDF under the requested name.
//! Every failure on this path is a `MergeWriteError`.
//!
//! # Examples
//!
//! ```no_run
//! use slidecat::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let stats = PdfWriter::new().save(doc, Path::new("merged.pdf")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{Result, SlideCatError};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes compressed PDFs through a temporary file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save `doc` to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `MergeWriteError` if the directory, the file, the
    /// serialization or the final rename fails.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || write_document(doc, &path_buf))
            .await
            .map_err(|err| SlideCatError::MergeWriteError {
                path: path.to_path_buf(),
                source: io::Error::other(format!("write task failed: {err}")),
            })?
    }
}

fn write_document(mut doc: Document, path: &Path) -> Result<WriteStatistics> {
    let start = Instant::now();
    let write_error = |source: io::Error| SlideCatError::MergeWriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    doc.compress();

    let write_path = temp_path_for(path);
    let result = (|| -> io::Result<()> {
        let file = std::fs::File::create(&write_path)?;
        let mut writer = io::BufWriter::new(file);
        doc.save_to(&mut writer).map_err(io::Error::other)?;
        writer.flush()?;
        std::fs::rename(&write_path, path)
    })();

    if let Err(err) = result {
        let _ = std::fs::remove_file(&write_path);
        return Err(write_error(err));
    }

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    log::debug!("wrote {} ({file_size} bytes)", path.display());

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path.to_path_buf(),
    })
}

/// Temporary sibling used for atomic writes: `merged.pdf` → `merged.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
