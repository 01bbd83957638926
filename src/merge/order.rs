//! Merge order selection.
//!
//! The resolved files are listed 1-indexed and the user may answer with a
//! selection such as `3,1-2`. An empty answer keeps the resolved order; an
//! invalid one is reported and also keeps the resolved order.

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use dialoguer::Input;

use crate::config::OrderSource;
use crate::error::{Result, SlideCatError};
use crate::output::OutputFormatter;
use crate::selection::{apply_selection, parse_selection};

const PROMPT: &str = "Enter the desired order (e.g. 3,1-2), or press Enter to keep this order";

/// List `files` and work out the order to merge them in.
///
/// When the answer comes from a prompt the numbered list is printed even in
/// quiet mode, since the positions refer to it.
///
/// # Errors
///
/// Returns an error only if reading the response from the terminal or stdin
/// fails. A bad selection is never an error.
pub fn choose_order(
    files: &[PathBuf],
    source: &OrderSource,
    formatter: &OutputFormatter,
) -> Result<Vec<PathBuf>> {
    let listing = listing_formatter(source, formatter);
    listing.info("PDF files found:");
    for (idx, file) in files.iter().enumerate() {
        listing.list_item(idx + 1, &file.display().to_string());
    }

    let response = match source {
        OrderSource::Preset(response) => response.clone(),
        OrderSource::Prompt => read_response()?,
    };

    Ok(apply_response(files, &response, formatter))
}

/// Turn a selection response into the merge order.
pub fn apply_response(files: &[PathBuf], response: &str, formatter: &OutputFormatter) -> Vec<PathBuf> {
    let response = response.trim();
    if response.is_empty() {
        formatter.info("Using default order.");
        return files.to_vec();
    }

    match parse_selection(response, files.len()) {
        Ok(indices) => {
            log::debug!("merge order from {response:?}: {indices:?}");
            apply_selection(files, &indices)
        }
        Err(err) => {
            let err = SlideCatError::from(err);
            formatter.error(&format!("{err}. Using default order."));
            files.to_vec()
        }
    }
}

fn listing_formatter(source: &OrderSource, formatter: &OutputFormatter) -> OutputFormatter {
    match source {
        OrderSource::Prompt => formatter.unquieted(),
        OrderSource::Preset(_) => *formatter,
    }
}

fn read_response() -> Result<String> {
    if io::stdin().is_terminal() {
        return Input::<String>::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| SlideCatError::other(format!("Failed to read merge order: {err}")));
    }

    // Piped input: one line, EOF counts as an empty answer.
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
