//! Excel I/O for the fill pipeline
//!
//! Import reads the first worksheet of an .xlsx file (first row as header)
//! into a `Sheet`; export writes a `Sheet` back out as a single-worksheet
//! .xlsx, either to a file or to an in-memory buffer for HTTP download.

mod reader;
mod writer;

pub use reader::{read_sheet, read_sheet_from_bytes};
pub use writer::{write_sheet, write_sheet_to_buffer};
