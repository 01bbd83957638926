//! Output formatting and display for slidecat.
//!
//! This module handles all user-facing output: status lines, warnings for
//! skipped files, and the conversion/merge summaries printed at the end of a
//! run.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::convert::ConversionReport;
use crate::merge::MergeStatistics;

/// Display the outcome of a conversion batch.
pub fn display_conversion_summary(formatter: &OutputFormatter, report: &ConversionReport) {
    if report.skipped_count() > 0 {
        formatter.warning(&format!(
            "{} file(s) skipped",
            report.skipped_count()
        ));
    }

    formatter.info(&format!(
        "Converted {} of {} file(s)",
        report.converted_count(),
        report.outcomes.len()
    ));
    formatter.info(&format!(
        "Total conversion time: {:.2} seconds",
        report.elapsed.as_secs_f64()
    ));
}

/// Display statistics for a finished merge.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    if stats.files_skipped > 0 {
        formatter.warning(&format!(
            "{} file(s) were missing and left out of the merge",
            stats.files_skipped
        ));
    }

    formatter.detail("Files merged", &stats.files_merged.to_string());
    formatter.detail("Total pages", &stats.total_pages.to_string());
    formatter.detail("Input size", &stats.format_input_size());
}
