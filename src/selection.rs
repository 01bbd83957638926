//! Parsing of merge order selections.
//!
//! A selection is a comma-separated list of 1-indexed positions and inclusive
//! ranges, for example `"1,3,5-7"` or `"2:4,1"`. Ranges may use either `-` or
//! `:` as the delimiter. Parsing yields 0-indexed positions in the order they
//! were written; duplicates are kept so a file can be merged more than once.
//!
//! # Examples
//!
//! ```
//! use slidecat::selection::parse_selection;
//!
//! let order = parse_selection("3,1-2", 3).unwrap();
//! assert_eq!(order, vec![2, 0, 1]);
//! ```

/// Reasons a selection string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Token is neither an integer nor a two-part range with integer bounds.
    #[error("Invalid token: '{token}'")]
    InvalidToken {
        /// The offending token, trimmed.
        token: String,
    },

    /// Range start is greater than its end.
    #[error("Range start must not be greater than end in: {token}")]
    InvalidRange {
        /// The offending token, trimmed.
        token: String,
    },

    /// A position falls outside the file list.
    #[error("One or more indices are out of valid range")]
    OutOfBounds,
}

/// Parse `input` into 0-indexed positions, each within `[0, max_len)`.
///
/// Token errors are reported in input order. The bounds check runs once every
/// token has been parsed, so a malformed token anywhere in the input takes
/// precedence over an out-of-range position.
///
/// # Errors
///
/// - [`SelectionError::InvalidToken`] for non-integer tokens or bounds
/// - [`SelectionError::InvalidRange`] when a range runs backwards
/// - [`SelectionError::OutOfBounds`] when a position is `< 1` or `> max_len`
pub fn parse_selection(input: &str, max_len: usize) -> Result<Vec<usize>, SelectionError> {
    let max_len = i64::try_from(max_len).unwrap_or(i64::MAX);
    let in_bounds = |position: i64| position >= 1 && position <= max_len;

    let mut indices = Vec::new();
    let mut out_of_bounds = false;

    for token in input.split(',') {
        let token = token.trim();

        match split_range(token) {
            Some((start, end)) => {
                let (start, end) = match (parse_bound(start), parse_bound(end)) {
                    (Some(start), Some(end)) => (start, end),
                    _ => return Err(invalid_token(token)),
                };

                if start > end {
                    return Err(SelectionError::InvalidRange {
                        token: token.to_string(),
                    });
                }

                // Don't expand a range that will be rejected anyway.
                if !in_bounds(start) || !in_bounds(end) {
                    out_of_bounds = true;
                    continue;
                }

                indices.extend((start..=end).map(|position| (position - 1) as usize));
            }
            None => {
                let position = parse_bound(token).ok_or_else(|| invalid_token(token))?;

                if in_bounds(position) {
                    indices.push((position - 1) as usize);
                } else {
                    out_of_bounds = true;
                }
            }
        }
    }

    if out_of_bounds {
        return Err(SelectionError::OutOfBounds);
    }

    Ok(indices)
}

/// Pick the entries of `items` named by `indices`, in that order.
///
/// `indices` must come from [`parse_selection`] with `max_len == items.len()`.
pub fn apply_selection<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&idx| items[idx].clone()).collect()
}

/// Split a range token on its delimiter. `-` wins when both are present.
///
/// Returns `None` for plain tokens. A token that contains a delimiter but
/// does not split into exactly two parts is returned as an unparseable pair.
fn split_range(token: &str) -> Option<(&str, &str)> {
    let delimiter = if token.contains('-') {
        '-'
    } else if token.contains(':') {
        ':'
    } else {
        return None;
    };

    let mut parts = token.split(delimiter);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Some((start, end)),
        _ => Some(("", "")),
    }
}

fn parse_bound(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn invalid_token(token: &str) -> SelectionError {
    SelectionError::InvalidToken {
        token: token.to_string(),
    }
}
