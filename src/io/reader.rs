//! PDF loading.
//!
//! # Examples
//!
//! ```no_run
//! use slidecat::io::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("chapter1.pdf"))?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlideCatError};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,
}

/// Loads PDF documents from disk.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns `FailedToLoadPdf` if the file cannot be read or parsed.
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let document = Document::load(path)
            .map_err(|err| SlideCatError::failed_to_load_pdf(path.to_path_buf(), err.to_string()))?;

        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        log::debug!(
            "loaded {} ({page_count} pages, {file_size} bytes, version {})",
            path.display(),
            document.version
        );

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size,
        })
    }
}
