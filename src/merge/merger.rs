//! Core PDF concatenation.
//!
//! The first file that can be appended becomes the base document. Every later
//! file has its objects renumbered past the current maximum id, its objects
//! copied in, and its pages pushed onto the base's root `Kids` array. Pages
//! keep their original parent node so inherited attributes still resolve.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{Result, SlideCatError};
use crate::io::{LoadedPdf, PdfReader};
use crate::output::OutputFormatter;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Default)]
pub struct MergeStatistics {
    /// Number of files appended (a file selected twice counts twice).
    pub files_merged: usize,

    /// Number of files that had disappeared by the time they were appended.
    pub files_skipped: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the appended input files.
    pub input_size: u64,

    /// Time spent loading and concatenating.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were appended, in order.
    pub merged_files: Vec<PathBuf>,
}

/// Concatenates PDF files in a given order.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate `ordered` into one document.
    ///
    /// Each file is checked for existence right before it is appended. A
    /// missing file is reported and skipped; if nothing is left the result is
    /// an empty document.
    ///
    /// # Errors
    ///
    /// Returns `FailedToLoadPdf` if a present file cannot be parsed or has no
    /// usable page tree.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use slidecat::merge::Merger;
    /// # use slidecat::output::OutputFormatter;
    /// # use std::path::PathBuf;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let files = vec![PathBuf::from("b.pdf"), PathBuf::from("a.pdf")];
    /// let result = Merger::new().merge(&files, &OutputFormatter::default())?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, ordered: &[PathBuf], formatter: &OutputFormatter) -> Result<MergeResult> {
        let start = Instant::now();
        let mut statistics = MergeStatistics::default();
        let mut merged_files = Vec::with_capacity(ordered.len());
        let mut merged: Option<Document> = None;

        for (idx, path) in ordered.iter().enumerate() {
            if !path.exists() {
                let err = SlideCatError::missing_input(path.clone());
                formatter.error(&format!("{err}. Skipping."));
                statistics.files_skipped += 1;
                continue;
            }

            let loaded = self.reader.load(path)?;
            formatter.debug(&format!(
                "[{}/{}] {} ({} pages)",
                idx + 1,
                ordered.len(),
                path.display(),
                loaded.page_count
            ));

            statistics.input_size += loaded.file_size;
            statistics.files_merged += 1;

            merged = Some(match merged {
                None => loaded.document,
                Some(mut base) => {
                    append_document(&mut base, loaded)?;
                    base
                }
            });
            merged_files.push(path.clone());
        }

        let mut document = match merged {
            Some(document) => document,
            None => {
                log::debug!("no input survived, producing an empty document");
                empty_document()
            }
        };

        document.renumber_objects();
        statistics.total_pages = document.get_pages().len();
        statistics.merge_time = start.elapsed();

        log::debug!(
            "merged {} file(s), {} skipped, {} pages, {} objects",
            statistics.files_merged,
            statistics.files_skipped,
            statistics.total_pages,
            document.objects.len()
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }
}

/// Move every object and page of `loaded` into `base`.
fn append_document(base: &mut Document, loaded: LoadedPdf) -> Result<()> {
    let LoadedPdf {
        mut document, path, ..
    } = loaded;

    document.renumber_objects_with(base.max_id + 1);
    base.max_id = document.max_id;

    let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
    base.objects.extend(document.objects);

    add_pages_to_tree(base, &page_ids).map_err(|err| {
        SlideCatError::failed_to_load_pdf(path, format!("cannot append pages: {err}"))
    })
}

/// Push `page_ids` onto the root `Kids` array of `merged` and patch `Count`.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> lopdf::Result<()> {
    let pages_id = merged.catalog()?.get(b"Pages")?.as_reference()?;
    let pages_dict = merged.get_object_mut(pages_id)?.as_dict_mut()?;

    let kids = pages_dict.get_mut(b"Kids")?.as_array_mut()?;
    kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    let current_count = pages_dict.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages_dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}

/// A valid document with an empty page tree.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}
