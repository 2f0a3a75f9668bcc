//! In-memory tabular model
//!
//! A `Sheet` is one worksheet read into memory: a header row plus data rows.
//! All transforms in this crate operate on row-major `Sheet`s; nothing is
//! streamed and nothing is written back to the input files.

use serde::Serialize;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    /// Text cell
    Text(String),
    /// Numeric cell (Excel stores all numbers as f64)
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Missing value. The only variant treated as "null" by the
    /// completeness filter; an empty string is still present.
    Empty,
}

impl Cell {
    /// True if the cell holds no value
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell as the string used for concatenation, grouping keys
    /// and export. Numbers drop a trailing `.0` so a group id stored as
    /// `1.0` reads `1`; `Empty` renders as the empty string.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One worksheet in memory: header row + data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Column names from the first row
    pub header: Vec<String>,
    /// Data rows, each padded to the header width
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Create an empty sheet with the given header
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Append a data row, padding or truncating to the header width
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.header.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Cell at (row, col), `Empty` if out of range
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }

    /// Overwrite the cell at (row, col); ignored if out of range
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(c) = r.get_mut(col) {
                *c = value;
            }
        }
    }

    /// Append a new column, filling existing rows with `Empty`.
    /// Returns the new column's index.
    pub fn add_column(&mut self, name: impl Into<String>) -> usize {
        self.header.push(name.into());
        for row in &mut self.rows {
            row.push(Cell::Empty);
        }
        self.header.len() - 1
    }

    /// Non-empty values of one column, in row order, rendered as strings
    pub fn column_values(&self, col: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(col).unwrap_or(&Cell::Empty))
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.display())
            .collect()
    }

    /// New sheet containing only the given columns, in the given order
    pub fn project(&self, columns: &[usize]) -> Sheet {
        let header = columns
            .iter()
            .map(|&c| self.header.get(c).cloned().unwrap_or_default())
            .collect();
        let mut projected = Sheet::new(header);
        for row in &self.rows {
            let cells = columns
                .iter()
                .map(|&c| row.get(c).cloned().unwrap_or(Cell::Empty))
                .collect();
            projected.push_row(cells);
        }
        projected
    }
}
