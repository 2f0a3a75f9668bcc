//! Merge-and-compute
//!
//! Fills source links positionally into the template's link column and
//! computes the content column for every row. The content rule mirrors the
//! spreadsheet formula the templates used to carry:
//!
//! ```text
//! =B2 & CHAR(10) & C2 & D2 & " " & CHAR(10) & E2
//! ```
//!
//! i.e. `body + "\n" + prefix + link + " " + "\n" + suffix`, with missing
//! cells treated as empty strings.

use crate::resolve::TemplateColumns;
use crate::sheet::{Cell, Sheet};
use tracing::warn;

/// Name of the content column synthesized when the template has none
pub const SYNTHESIZED_CONTENT: &str = "Content";
/// Name of the link column synthesized when the template has none
pub const SYNTHESIZED_LINK: &str = "Link";

/// Result of the merge step
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Template copy with links filled and content computed
    pub sheet: Sheet,
    /// Index of the link column (resolved or synthesized)
    pub link_column: usize,
    /// Index of the content column (resolved or synthesized)
    pub content_column: usize,
    /// Character count of each row's content
    pub content_lengths: Vec<usize>,
    /// Non-fatal warnings (link/row count mismatch)
    pub warnings: Vec<String>,
}

/// Fill `links` into the template and compute the content column.
///
/// Link assignment is positional and order-preserving: the k-th link lands
/// in the k-th row for k < row count. Excess links are dropped with a
/// warning; a shortage leaves trailing rows' link cells unchanged.
pub fn merge_links(template: &Sheet, columns: &TemplateColumns, links: &[String]) -> MergeOutcome {
    let mut sheet = template.clone();
    let mut warnings = Vec::new();

    let link_column = match columns.link {
        Some(idx) => idx,
        None => sheet.add_column(SYNTHESIZED_LINK),
    };
    let content_column = match columns.content {
        Some(idx) => idx,
        None => sheet.add_column(SYNTHESIZED_CONTENT),
    };

    let row_count = sheet.row_count();
    if links.len() > row_count {
        let message = format!(
            "Source has {} links but the template has only {} rows; extra links are dropped",
            links.len(),
            row_count
        );
        warn!("{}", message);
        warnings.push(message);
    } else if links.len() < row_count {
        let message = format!(
            "Source has {} links for {} template rows; trailing rows keep their existing link values",
            links.len(),
            row_count
        );
        warn!("{}", message);
        warnings.push(message);
    }

    for (row, link) in links.iter().take(row_count).enumerate() {
        sheet.set_cell(row, link_column, Cell::Text(link.clone()));
    }

    let mut content_lengths = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let text = |col: Option<usize>| -> String {
            col.map(|c| sheet.cell(row, c).display()).unwrap_or_default()
        };

        let body = text(columns.body);
        let prefix = text(columns.prefix);
        let link = sheet.cell(row, link_column).display();
        let suffix = text(columns.suffix);

        let content = format!("{}\n{}{} \n{}", body, prefix, link, suffix);
        content_lengths.push(content.chars().count());
        sheet.set_cell(row, content_column, Cell::Text(content));
    }

    MergeOutcome {
        sheet,
        link_column,
        content_column,
        content_lengths,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::TemplateColumns;
    use crate::sheet::{Cell, Sheet};

    fn template() -> (Sheet, TemplateColumns) {
        let mut sheet = Sheet::new(
            ["文案", "正文", "回到", "链接", "退订", "语言", "区域"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for (gid, locale) in [(1.0, "en"), (1.0, "ja"), (2.0, "ko")] {
            sheet.push_row(vec![
                Cell::Number(gid),
                Cell::Text("Hello".to_string()),
                Cell::Text("Tap here: ".to_string()),
                Cell::Empty,
                Cell::Text("Reply STOP to opt out".to_string()),
                Cell::Text(locale.to_string()),
                Cell::Text("US".to_string()),
            ]);
        }
        let columns = TemplateColumns::resolve(&sheet).unwrap();
        (sheet, columns)
    }

    fn links(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_fill() {
        let (sheet, columns) = template();
        let outcome = merge_links(&sheet, &columns, &links(&["L1", "L2", "L3"]));

        assert_eq!(outcome.sheet.cell(0, 3), &Cell::Text("L1".to_string()));
        assert_eq!(outcome.sheet.cell(1, 3), &Cell::Text("L2".to_string()));
        assert_eq!(outcome.sheet.cell(2, 3), &Cell::Text("L3".to_string()));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_content_formula() {
        let (sheet, columns) = template();
        let outcome = merge_links(&sheet, &columns, &links(&["https://x.co/a"]));

        let expected = "Hello\nTap here: https://x.co/a \nReply STOP to opt out";
        assert_eq!(
            outcome.sheet.cell(0, outcome.content_column),
            &Cell::Text(expected.to_string())
        );
        assert_eq!(outcome.content_lengths[0], expected.chars().count());
    }

    #[test]
    fn test_excess_links_truncated_with_warning() {
        let (sheet, columns) = template();
        let outcome = merge_links(&sheet, &columns, &links(&["L1", "L2", "L3", "L4", "L5"]));

        assert_eq!(outcome.sheet.row_count(), 3);
        assert_eq!(outcome.sheet.cell(2, 3), &Cell::Text("L3".to_string()));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("extra links are dropped"));
    }

    #[test]
    fn test_link_shortage_leaves_trailing_rows() {
        let (sheet, columns) = template();
        let outcome = merge_links(&sheet, &columns, &links(&["L1"]));

        assert_eq!(outcome.sheet.cell(0, 3), &Cell::Text("L1".to_string()));
        // rows 1 and 2 keep their (empty) link cells
        assert_eq!(outcome.sheet.cell(1, 3), &Cell::Empty);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("trailing rows"));
    }

    #[test]
    fn test_missing_columns_synthesized() {
        // Three-column template: the link fallback (index 3) is out of
        // range, so link and content columns get appended. Body and
        // prefix still resolve positionally onto columns 1 and 2.
        let mut sheet = Sheet::new(
            ["文案", "语言", "区域"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        sheet.push_row(vec![
            Cell::Number(1.0),
            Cell::Text("en".to_string()),
            Cell::Text("US".to_string()),
        ]);
        let columns = TemplateColumns::resolve(&sheet).unwrap();
        assert_eq!(columns.link, None);
        assert_eq!(columns.suffix, None);

        let outcome = merge_links(&sheet, &columns, &links(&["L1"]));

        assert_eq!(
            outcome.sheet.header[outcome.link_column],
            SYNTHESIZED_LINK.to_string()
        );
        assert_eq!(
            outcome.sheet.header[outcome.content_column],
            SYNTHESIZED_CONTENT.to_string()
        );
        assert_eq!(
            outcome.sheet.cell(0, outcome.content_column),
            &Cell::Text("en\nUSL1 \n".to_string())
        );
    }

    #[test]
    fn test_empty_operands_become_empty_strings() {
        let (mut sheet, columns) = template();
        sheet.set_cell(0, 1, Cell::Empty); // body
        sheet.set_cell(0, 2, Cell::Empty); // prefix
        sheet.set_cell(0, 4, Cell::Empty); // suffix

        let outcome = merge_links(&sheet, &columns, &links(&["L1"]));

        assert_eq!(
            outcome.sheet.cell(0, outcome.content_column),
            &Cell::Text("\nL1 \n".to_string())
        );
    }

    #[test]
    fn test_content_overwrites_existing_content_column() {
        let mut sheet = Sheet::new(
            ["文案", "正文", "回到", "链接", "退订", "语言", "区域", "内容"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        sheet.push_row(vec![
            Cell::Number(1.0),
            Cell::Text("B".to_string()),
            Cell::Text("C".to_string()),
            Cell::Empty,
            Cell::Text("E".to_string()),
            Cell::Text("en".to_string()),
            Cell::Text("US".to_string()),
            Cell::Text("stale formula result".to_string()),
        ]);
        let columns = TemplateColumns::resolve(&sheet).unwrap();
        let outcome = merge_links(&sheet, &columns, &links(&["D"]));

        assert_eq!(outcome.content_column, 7);
        assert_eq!(
            outcome.sheet.cell(0, 7),
            &Cell::Text("B\nCD \nE".to_string())
        );
    }

    #[test]
    fn test_numeric_cells_render_without_decimal() {
        let (mut sheet, columns) = template();
        sheet.set_cell(0, 1, Cell::Number(5.0)); // body becomes numeric
        let outcome = merge_links(&sheet, &columns, &links(&["L1"]));

        let content = outcome.sheet.cell(0, outcome.content_column).display();
        assert!(content.starts_with("5\n"));
    }
}
