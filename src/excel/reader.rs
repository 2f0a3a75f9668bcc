//! Excel reader implementation - .xlsx → `Sheet`

use crate::error::{FillError, FillResult};
use crate::sheet::{Cell, Sheet};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Read the first worksheet of an .xlsx file, first row as header
pub fn read_sheet(path: &Path) -> FillResult<Sheet> {
    if !path.exists() {
        return Err(FillError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| FillError::Import(format!("Failed to open Excel file: {}", e)))?;

    first_sheet(&mut workbook)
}

/// Read the first worksheet from .xlsx bytes (uploaded file contents)
pub fn read_sheet_from_bytes(bytes: &[u8]) -> FillResult<Sheet> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| FillError::Import(format!("Failed to open Excel data: {}", e)))?;

    first_sheet(&mut workbook)
}

fn first_sheet<RS: std::io::Read + std::io::Seek>(workbook: &mut Xlsx<RS>) -> FillResult<Sheet> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FillError::Import("Workbook contains no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| FillError::Import(format!("Failed to read worksheet: {}", e)))?;

    convert_range(&range)
}

/// Convert a calamine cell range to a `Sheet`
fn convert_range(range: &Range<Data>) -> FillResult<Sheet> {
    let (height, width) = range.get_size();

    if height == 0 || width == 0 {
        return Err(FillError::Import(
            "Worksheet is empty (no header row)".to_string(),
        ));
    }

    // Header row (row 0); blank headers get positional names
    let mut header: Vec<String> = Vec::with_capacity(width);
    for col in 0..width {
        let name = match range.get((0, col)) {
            Some(Data::String(s)) if !s.is_empty() => s.clone(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Float(f)) => f.to_string(),
            _ => format!("col_{}", col),
        };
        header.push(name);
    }

    let mut sheet = Sheet::new(header);

    for row in 1..height {
        let cells: Vec<Cell> = (0..width)
            .map(|col| convert_cell(range.get((row, col))))
            .collect();
        sheet.push_row(cells);
    }

    Ok(sheet)
}

fn convert_cell(data: Option<&Data>) -> Cell {
    match data {
        Some(Data::String(s)) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Some(Data::Float(f)) => Cell::Number(*f),
        Some(Data::Int(i)) => Cell::Number(*i as f64),
        Some(Data::Bool(b)) => Cell::Bool(*b),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => Cell::Text(s.clone()),
        Some(Data::DateTime(dt)) => Cell::Number(dt.as_f64()),
        Some(Data::Error(_)) | Some(Data::Empty) | None => Cell::Empty,
    }
}
