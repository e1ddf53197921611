// Excel import (xlsx, xlsm, xlsb, xls, ods) via calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use sheetlens_core::Sheet;

/// Load the first worksheet of an Excel-family workbook.
///
/// Only the first sheet is read. Cells become display strings; absent
/// cells become empty strings, so the result has the same shape a CSV
/// load would.
pub fn load(path: &Path) -> Result<Sheet, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| "workbook contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("failed to read sheet '{}': {}", first, e))?;

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(range.height());
    for row in range.rows() {
        rows.push(row.iter().map(cell_to_string).collect());
    }

    Ok(Sheet::new(rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        // Date cells surface as their serial number
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
