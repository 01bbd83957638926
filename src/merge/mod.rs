//! PDF merging.
//!
//! A merge resolves its inputs, settles the order, concatenates the files
//! through [`Merger`] and writes the result with [`PdfWriter`].

pub mod merger;
pub mod order;

pub use merger::{MergeResult, MergeStatistics, Merger};
pub use order::{apply_response, choose_order};

use std::path::PathBuf;
use std::time::Instant;

use tokio::task;

use crate::config::MergeConfig;
use crate::error::{Result, SlideCatError};
use crate::io::{PdfWriter, WriteStatistics};
use crate::output::OutputFormatter;
use crate::resolve::{FileKind, resolve};
use crate::utils::has_extension;

/// Everything a finished merge reports back.
#[derive(Debug)]
pub struct MergeReport {
    /// Files in the order they were handed to the merger.
    pub order: Vec<PathBuf>,
    /// Merge statistics.
    pub statistics: MergeStatistics,
    /// Write statistics; `None` for a dry run.
    pub write: Option<WriteStatistics>,
}

/// Resolve, order, merge and write the PDFs named by `config`.
///
/// With `dry_run` the inputs are still loaded and concatenated so the page
/// total can be reported, but nothing is written.
///
/// # Errors
///
/// Returns `InsufficientFiles` when fewer than two PDFs resolve,
/// `FailedToLoadPdf` for a file that cannot be parsed and `MergeWriteError`
/// when the output cannot be written.
pub async fn merge_pdfs(
    config: &MergeConfig,
    dry_run: bool,
    formatter: &OutputFormatter,
) -> Result<MergeReport> {
    let resolved = resolve(&config.inputs, FileKind::Pdf, formatter)?;
    let order = choose_order(&resolved.files, &config.order, formatter)?;

    formatter.info("Merging files in the following order:");
    for (idx, file) in order.iter().enumerate() {
        formatter.list_item(idx + 1, &file.display().to_string());
    }

    if !has_extension(&config.output, "pdf") {
        formatter.warning(&format!(
            "Output file '{}' does not have a .pdf extension",
            config.output.display()
        ));
    }

    let start = Instant::now();

    let merge_input = order.clone();
    let merge_formatter = *formatter;
    let result = task::spawn_blocking(move || Merger::new().merge(&merge_input, &merge_formatter))
        .await
        .map_err(|err| SlideCatError::WorkerFailed {
            reason: err.to_string(),
        })??;

    let write = if dry_run {
        formatter.success(&format!(
            "Dry run: {} page(s) from {} file(s) would be written to {}",
            result.statistics.total_pages,
            result.statistics.files_merged,
            config.output.display()
        ));
        None
    } else {
        let stats = PdfWriter::new()
            .save(result.document, &config.output)
            .await?;
        formatter.success(&format!(
            "Merged PDF saved as {} ({})",
            config.output.display(),
            stats.format_file_size()
        ));
        Some(stats)
    };

    formatter.info(&format!(
        "Total merge time: {:.2} seconds",
        start.elapsed().as_secs_f64()
    ));

    Ok(MergeReport {
        order,
        statistics: result.statistics,
        write,
    })
}
