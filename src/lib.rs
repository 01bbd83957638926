//! slidecat - Convert presentations to PDF and merge PDFs.
//!
//! This library provides the two operations behind the `slidecat` binary:
//!
//! - Converting `.pptx` files to PDF by running LibreOffice once per file,
//!   one at a time or across a fixed pool of workers
//! - Concatenating PDFs in the resolved order or a user-chosen order
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use slidecat::config::{MergeConfig, OrderSource};
//! use slidecat::merge::merge_pdfs;
//! use slidecat::output::OutputFormatter;
//! use slidecat::resolve::InputSpec;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig {
//!     inputs: InputSpec::Paths(vec!["a.pdf".into(), "b.pdf".into()]),
//!     output: PathBuf::from("merged.pdf"),
//!     order: OrderSource::Preset("2,1".into()),
//! };
//!
//! let report = merge_pdfs(&config, false, &OutputFormatter::default()).await?;
//! println!("Created {} page document", report.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Convert
//!
//! ```no_run
//! use slidecat::config::{ConvertConfig, ConverterConfig, ExecutionMode};
//! use slidecat::convert::convert_presentations;
//! use slidecat::output::OutputFormatter;
//! use slidecat::resolve::InputSpec;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConvertConfig {
//!     inputs: InputSpec::Pattern("talks/*.pptx".into()),
//!     output_dir: PathBuf::from("pdfs"),
//!     mode: ExecutionMode::Parallel { workers: 4 },
//!     converter: ConverterConfig::default(),
//! };
//!
//! let report = convert_presentations(&config, &OutputFormatter::default()).await?;
//! println!("{} converted", report.converted_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod resolve;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SlideCatError};

use crate::config::{Action, ConvertConfig};
use crate::convert::{convert_presentations, plan_conversion};
use crate::output::{OutputFormatter, display_conversion_summary, display_merge_statistics};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the action described by `config`.
///
/// # Errors
///
/// Returns the first fatal error of the action. Skipped files are reported
/// through `formatter` and do not make the run fail.
pub async fn run(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be created");
        formatter.blank_line();
    }

    match &config.action {
        Action::Convert(convert) if config.dry_run => dry_run_conversion(convert, formatter),
        Action::Convert(convert) => {
            let report = convert_presentations(convert, formatter).await?;
            formatter.blank_line();
            display_conversion_summary(formatter, &report);
            Ok(())
        }
        Action::Merge(merge) => {
            let report = merge::merge_pdfs(merge, config.dry_run, formatter).await?;
            display_merge_statistics(formatter, &report.statistics);
            if let Some(write) = &report.write {
                formatter.detail(
                    "Write time",
                    &format!("{:.2}s", write.write_time.as_secs_f64()),
                );
            }
            Ok(())
        }
    }
}

fn dry_run_conversion(config: &ConvertConfig, formatter: &OutputFormatter) -> Result<()> {
    let jobs = plan_conversion(config, formatter)?;

    formatter.blank_line();
    formatter.info(&format!(
        "Would convert {} file(s) into {} ({:?} mode):",
        jobs.len(),
        config.output_dir.display(),
        config.mode
    ));
    for job in &jobs {
        formatter.bullet(&format!(
            "{} → {}",
            job.source.display(),
            job.expected_output().display()
        ));
    }

    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info("  Run without --dry-run to convert the files");
    Ok(())
}
