//! Excel writer implementation - `Sheet` → .xlsx

use crate::error::{FillError, FillResult};
use crate::sheet::{Cell, Sheet};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Write a sheet to an .xlsx file (header row, no index column)
pub fn write_sheet(sheet: &Sheet, output_path: &Path) -> FillResult<()> {
    let mut workbook = build_workbook(sheet)?;
    workbook
        .save(output_path)
        .map_err(|e| FillError::Export(format!("Failed to save Excel file: {}", e)))?;
    Ok(())
}

/// Serialize a sheet to .xlsx bytes for download delivery
pub fn write_sheet_to_buffer(sheet: &Sheet) -> FillResult<Vec<u8>> {
    let mut workbook = build_workbook(sheet)?;
    workbook
        .save_to_buffer()
        .map_err(|e| FillError::Export(format!("Failed to serialize Excel file: {}", e)))
}

fn build_workbook(sheet: &Sheet) -> FillResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Header row (row 0)
    for (col_idx, name) in sheet.header.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, name)
            .map_err(|e| FillError::Export(format!("Failed to write header: {}", e)))?;
    }

    // Data rows (starting at row 1)
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    Ok(workbook)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> FillResult<()> {
    match cell {
        Cell::Text(s) => {
            worksheet
                .write_string(row, col, s)
                .map_err(|e| FillError::Export(format!("Failed to write text: {}", e)))?;
        }
        Cell::Number(n) => {
            worksheet
                .write_number(row, col, *n)
                .map_err(|e| FillError::Export(format!("Failed to write number: {}", e)))?;
        }
        Cell::Bool(b) => {
            worksheet
                .write_boolean(row, col, *b)
                .map_err(|e| FillError::Export(format!("Failed to write boolean: {}", e)))?;
        }
        Cell::Empty => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_sheet() -> Sheet {
        let mut sheet = Sheet::new(vec![
            "Language".to_string(),
            "Region".to_string(),
            "Content".to_string(),
        ]);
        sheet.push_row(vec![
            Cell::Text("en".to_string()),
            Cell::Text("US,CA".to_string()),
            Cell::Text("Hello\nhttps://x.co \n".to_string()),
        ]);
        sheet.push_row(vec![
            Cell::Text("ja".to_string()),
            Cell::Empty,
            Cell::Number(7.0),
        ]);
        sheet
    }

    #[test]
    fn test_write_sheet_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        write_sheet(&sample_sheet(), &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_sheet_to_buffer_nonempty() {
        let bytes = write_sheet_to_buffer(&sample_sheet()).unwrap();
        // xlsx files are zip archives: PK magic
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_write_sheet_to_nonexistent_directory_fails() {
        let path = Path::new("/nonexistent/dir/out.xlsx");
        let result = write_sheet(&sample_sheet(), path);
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_through_reader() {
        let sheet = sample_sheet();
        let bytes = write_sheet_to_buffer(&sheet).unwrap();
        let back = crate::excel::read_sheet_from_bytes(&bytes).unwrap();

        assert_eq!(back.header, sheet.header);
        assert_eq!(back.row_count(), 2);
        assert_eq!(back.cell(0, 0), &Cell::Text("en".to_string()));
        assert_eq!(back.cell(1, 1), &Cell::Empty);
        assert_eq!(back.cell(1, 2), &Cell::Number(7.0));
    }
}
