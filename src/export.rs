//! Filter-and-group export
//!
//! Drops rows missing a locale or region, partitions the merged table by
//! copy-group id and projects each partition to the export columns
//! (locale, region, sender, title, content). Each non-empty partition
//! becomes one .xlsx artifact; empty partitions are skipped silently.

use crate::error::FillResult;
use crate::excel;
use crate::merge::MergeOutcome;
use crate::resolve::TemplateColumns;
use crate::sheet::Sheet;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the group id in output name templates
pub const NAME_TEMPLATE_ID: &str = "{id}";
/// Default output name template
pub const DEFAULT_NAME_TEMPLATE: &str = "output_group_{id}.xlsx";

/// One exportable copy group
#[derive(Debug, Clone)]
pub struct GroupExport {
    /// Group id rendered as a display string
    pub group_id: String,
    /// Default output file name, `output_group_<id>.xlsx`
    pub default_name: String,
    /// Projected rows for this group (export columns only)
    pub sheet: Sheet,
}

/// Partition the merged table into per-group exports.
///
/// Every returned row has both locale and region present; partitions are
/// disjoint and cover all surviving rows, in first-seen group order.
pub fn partition_groups(outcome: &MergeOutcome, columns: &TemplateColumns) -> Vec<GroupExport> {
    let sheet = &outcome.sheet;

    // Export columns: locale, region, sender, title, content; absent
    // optional roles are simply omitted.
    let export_columns: Vec<usize> = [
        Some(columns.locale),
        Some(columns.region),
        columns.sender,
        columns.title,
        Some(outcome.content_column),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();

    for (row_idx, _) in sheet.rows.iter().enumerate() {
        if sheet.cell(row_idx, columns.locale).is_empty()
            || sheet.cell(row_idx, columns.region).is_empty()
        {
            continue;
        }

        let group_id = sheet.cell(row_idx, columns.group_id).display();
        groups
            .entry(group_id.clone())
            .or_insert_with(|| {
                order.push(group_id.clone());
                Vec::new()
            })
            .push(row_idx);
    }

    order
        .into_iter()
        .filter_map(|group_id| {
            let row_indices = groups.remove(&group_id)?;
            if row_indices.is_empty() {
                return None;
            }
            let mut group_rows = Sheet::new(sheet.header.clone());
            for row_idx in row_indices {
                group_rows.push_row(sheet.rows[row_idx].clone());
            }
            let default_name = apply_name_template(DEFAULT_NAME_TEMPLATE, &group_id);
            Some(GroupExport {
                group_id,
                default_name,
                sheet: group_rows.project(&export_columns),
            })
        })
        .collect()
}

/// Expand a name template (`{id}` placeholder) and enforce the `.xlsx`
/// extension
pub fn apply_name_template(template: &str, group_id: &str) -> String {
    ensure_xlsx(template.replace(NAME_TEMPLATE_ID, group_id))
}

/// Resolve the delivered file name: override when given, default otherwise,
/// always with `.xlsx` appended if missing
pub fn output_file_name(export: &GroupExport, override_name: Option<&str>) -> String {
    match override_name.map(str::trim) {
        Some(name) if !name.is_empty() => ensure_xlsx(name.to_string()),
        _ => export.default_name.clone(),
    }
}

fn ensure_xlsx(name: String) -> String {
    if name.to_lowercase().ends_with(".xlsx") {
        name
    } else {
        format!("{}.xlsx", name)
    }
}

/// Write every group to `dir` using the given name template.
/// Returns the written paths in group order.
pub fn write_exports(
    exports: &[GroupExport],
    dir: &Path,
    name_template: &str,
) -> FillResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(exports.len());
    for export in exports {
        let file_name = apply_name_template(name_template, &export.group_id);
        let path = dir.join(file_name);
        excel::write_sheet(&export.sheet, &path)?;
        written.push(path);
    }
    Ok(written)
}
