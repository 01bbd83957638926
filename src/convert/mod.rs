//! Batch conversion of presentations to PDF.
//!
//! Jobs are independent: they share nothing but the output directory, and
//! the converter writes a distinct file for each. A batch runs either one job
//! at a time in resolved order, or through a fixed number of worker slots
//! with no ordering guarantee between completions. A sequential batch stops
//! at the first fatal error; a parallel one awaits every job before
//! reporting it.
//!
//! # Examples
//!
//! ```no_run
//! use slidecat::config::{ConverterConfig, ExecutionMode};
//! use slidecat::convert::{ConversionJob, Converter, run_batch};
//! use slidecat::output::OutputFormatter;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Arc::new(Converter::new(ConverterConfig::default()));
//! let jobs = vec![ConversionJob::new("intro.pptx", "pdf/")];
//! let report = run_batch(
//!     converter,
//!     jobs,
//!     ExecutionMode::Parallel { workers: 4 },
//!     &OutputFormatter::default(),
//! )
//! .await?;
//! println!("{} converted", report.converted_count());
//! # Ok(())
//! # }
//! ```

pub mod converter;

pub use converter::{ConversionJob, Converter, FileOutcome};

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::config::{ConvertConfig, ExecutionMode};
use crate::error::{Result, SlideCatError};
use crate::output::OutputFormatter;
use crate::resolve::{FileKind, resolve};

/// Aggregated outcome of a conversion batch.
#[derive(Debug)]
pub struct ConversionReport {
    /// One outcome per job, in completion order.
    pub outcomes: Vec<FileOutcome>,
    /// Wall-clock time spent running the batch.
    pub elapsed: Duration,
}

impl ConversionReport {
    /// Number of files the converter handled successfully.
    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    /// Number of files that were skipped.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }
}

/// Resolve the presentations named by `config` into conversion jobs.
///
/// # Errors
///
/// Returns `NoValidFiles` if no `.pptx` file survives resolution.
pub fn plan_conversion(
    config: &ConvertConfig,
    formatter: &OutputFormatter,
) -> Result<Vec<ConversionJob>> {
    let resolved = resolve(&config.inputs, FileKind::Presentation, formatter)?;

    formatter.info("Valid PPTX files found:");
    for (idx, file) in resolved.files.iter().enumerate() {
        formatter.list_item(idx + 1, &file.display().to_string());
    }

    Ok(resolved
        .files
        .into_iter()
        .map(|source| ConversionJob::new(source, &config.output_dir))
        .collect())
}

/// Resolve, prepare the output directory and convert every presentation.
///
/// # Errors
///
/// Returns an error if resolution fails, the output directory cannot be
/// created, or the batch hits a fatal error.
pub async fn convert_presentations(
    config: &ConvertConfig,
    formatter: &OutputFormatter,
) -> Result<ConversionReport> {
    let jobs = plan_conversion(config, formatter)?;

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let converter = Arc::new(Converter::new(config.converter.clone()));
    run_batch(converter, jobs, config.mode, formatter).await
}

/// Run `jobs` in the given execution mode.
///
/// # Errors
///
/// Returns the first batch-fatal error (converter missing, worker panicked)
/// once every job has finished. Per-file failures are part of the report.
pub async fn run_batch(
    converter: Arc<Converter>,
    jobs: Vec<ConversionJob>,
    mode: ExecutionMode,
    formatter: &OutputFormatter,
) -> Result<ConversionReport> {
    let start = Instant::now();

    log::debug!(
        "converting {} file(s), {} at a time",
        jobs.len(),
        mode.concurrency()
    );

    let outcomes = match mode {
        ExecutionMode::Sequential => run_sequential(&converter, &jobs, formatter).await?,
        ExecutionMode::Parallel { workers } => {
            run_parallel(converter, jobs, workers, formatter).await?
        }
    };

    Ok(ConversionReport {
        outcomes,
        elapsed: start.elapsed(),
    })
}

async fn run_sequential(
    converter: &Converter,
    jobs: &[ConversionJob],
    formatter: &OutputFormatter,
) -> Result<Vec<FileOutcome>> {
    let mut outcomes = Vec::with_capacity(jobs.len());

    for job in jobs {
        let outcome = converter.convert(job).await?;
        report_outcome(formatter, job, &outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

async fn run_parallel(
    converter: Arc<Converter>,
    jobs: Vec<ConversionJob>,
    workers: usize,
    formatter: &OutputFormatter,
) -> Result<Vec<FileOutcome>> {
    let (outcomes, failure) = drain_parallel(converter, jobs, workers, formatter).await;

    match failure {
        Some(err) => Err(err),
        None => Ok(outcomes),
    }
}

/// Run every job, keeping the outcomes alongside the first batch-fatal error.
async fn drain_parallel(
    converter: Arc<Converter>,
    jobs: Vec<ConversionJob>,
    workers: usize,
    formatter: &OutputFormatter,
) -> (Vec<FileOutcome>, Option<SlideCatError>) {
    let workers = workers.max(1);
    let total = jobs.len();

    // Each job is spawned when the stream pulls it, so at most `workers`
    // converter processes exist at any time.
    let tasks = jobs.into_iter().map(|job| {
        let converter = Arc::clone(&converter);
        tokio::spawn(async move {
            let outcome = converter.convert(&job).await;
            (job, outcome)
        })
    });

    let mut pending = stream::iter(tasks).buffer_unordered(workers);
    let mut outcomes = Vec::with_capacity(total);
    let mut failure = None;

    while let Some(joined) = pending.next().await {
        let error = match joined {
            Ok((job, Ok(outcome))) => {
                report_outcome(formatter, &job, &outcome);
                outcomes.push(outcome);
                continue;
            }
            Ok((job, Err(err))) => {
                log::error!("conversion of {} failed: {err}", job.source.display());
                err
            }
            Err(join_err) => SlideCatError::WorkerFailed {
                reason: join_err.to_string(),
            },
        };

        if failure.is_none() {
            failure = Some(error);
        }
    }

    (outcomes, failure)
}

fn report_outcome(formatter: &OutputFormatter, job: &ConversionJob, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Converted { source, .. } => formatter.success(&format!(
            "Converted: {} → {}",
            source.display(),
            job.output_dir.display()
        )),
        FileOutcome::Skipped { error, .. } => formatter.error(&format!("{error}. Skipping.")),
    }
}
