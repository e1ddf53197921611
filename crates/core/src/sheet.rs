// Parsed spreadsheet data

use serde::Serialize;

/// A parsed spreadsheet: row 0 is the header row (column labels, possibly
/// empty strings), every later row is a data row of string cells.
///
/// Rows are kept exactly as parsed; data rows may be shorter or longer
/// than the header row. Width normalization happens when a page view is
/// produced, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// A sheet with no rows at all — the "no data" state.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Total rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header labels, or None when the sheet has no rows.
    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Data rows only (everything after the header row).
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Number of data rows: total minus the header, 0 for a sheet with at
    /// most one row.
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Vec<String>>> for Sheet {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
