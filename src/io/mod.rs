//! PDF file I/O.
//!
//! Loading goes through [`PdfReader`]; the merged document is written by
//! [`PdfWriter`].

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
