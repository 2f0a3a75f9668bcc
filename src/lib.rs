//! Linkfill - merge short links into localized messaging templates
//!
//! This library reads a "source" spreadsheet of short links and a
//! "template" spreadsheet of per-locale messaging copy, fills the links
//! into the template's link column in order, computes the message content
//! column, filters rows by locale/region completeness, and exports one
//! .xlsx file per copy group.
//!
//! # Features
//!
//! - Heuristic column resolution (bilingual aliases with positional fallback)
//! - Positional link fill with truncation warnings
//! - Content concatenation with null handling
//! - Per-group filtered export with user-editable file names
//! - CLI and HTTP upload/download front ends
//!
//! # Example
//!
//! ```no_run
//! use linkfill::pipeline::analyze_files;
//! use linkfill::export::write_exports;
//! use std::path::Path;
//!
//! let analysis = analyze_files(Path::new("links.xlsx"), Path::new("template.xlsx"))?;
//! for warning in &analysis.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! write_exports(&analysis.exports, Path::new("out"), "output_group_{id}.xlsx")?;
//! # Ok::<(), linkfill::error::FillError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod export;
pub mod merge;
pub mod pipeline;
pub mod resolve;
pub mod sheet;

// Re-export commonly used types
pub use error::{FillError, FillResult};
pub use export::GroupExport;
pub use pipeline::Analysis;
pub use sheet::{Cell, Sheet};
