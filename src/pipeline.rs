//! End-to-end analyze pipeline: load → resolve → merge → partition
//!
//! One call runs the whole transform on in-memory copies of both inputs.
//! There is no shared state between runs; the caller decides what to do
//! with the resulting group exports (write to disk, hold in a session for
//! download, or just display the preview).

use crate::error::FillResult;
use crate::excel;
use crate::export::{partition_groups, GroupExport};
use crate::merge::merge_links;
use crate::resolve::{SourceColumns, TemplateColumns};
use crate::sheet::Sheet;
use std::path::Path;

/// Result of one analyze run
#[derive(Debug, Clone)]
pub struct Analysis {
    /// One entry per copy group with at least one complete row
    pub exports: Vec<GroupExport>,
    /// Role → resolved template header name
    pub columns: Vec<(&'static str, Option<String>)>,
    /// Number of non-empty links found in the source
    pub link_count: usize,
    /// Character count of the longest computed content cell. SMS and
    /// push channels cap message length, so the preview surfaces it.
    pub max_content_length: usize,
    /// Non-fatal warnings collected along the way
    pub warnings: Vec<String>,
}

/// Analyze two workbooks given as file paths
pub fn analyze_files(source: &Path, template: &Path) -> FillResult<Analysis> {
    let source_sheet = excel::read_sheet(source)?;
    let template_sheet = excel::read_sheet(template)?;
    analyze(source_sheet, template_sheet)
}

/// Analyze two workbooks given as raw .xlsx bytes (upload path)
pub fn analyze_bytes(source: &[u8], template: &[u8]) -> FillResult<Analysis> {
    let source_sheet = excel::read_sheet_from_bytes(source)?;
    let template_sheet = excel::read_sheet_from_bytes(template)?;
    analyze(source_sheet, template_sheet)
}

fn analyze(source: Sheet, template: Sheet) -> FillResult<Analysis> {
    let source_columns = SourceColumns::resolve(&source)?;
    let links = source.column_values(source_columns.link);

    let template_columns = TemplateColumns::resolve(&template)?;
    let outcome = merge_links(&template, &template_columns, &links);
    let exports = partition_groups(&outcome, &template_columns);

    Ok(Analysis {
        columns: template_columns.describe(&outcome.sheet),
        exports,
        link_count: links.len(),
        max_content_length: outcome.content_lengths.iter().copied().max().unwrap_or(0),
        warnings: outcome.warnings,
    })
}
