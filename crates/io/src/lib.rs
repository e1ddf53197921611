// File loading - CSV/TSV and Excel formats into a Sheet

pub mod csv;
pub mod excel;

use std::path::Path;

use sheetlens_core::Sheet;

/// Load a spreadsheet file, dispatching on the file extension.
///
/// The first row of the result is the header row; parsing itself attaches
/// no meaning to it. Multi-sheet workbooks load their first sheet only.
pub fn load_sheet(path: &Path) -> Result<Sheet, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "txt" => csv::load(path),
        "tsv" => csv::load_with_delimiter(path, b'\t'),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => excel::load(path),
        _ => Err(format!(
            "unsupported file type {:?} (expected csv, tsv, txt, xlsx, xlsm, xlsb, xls, or ods)",
            path.display()
        )),
    }
}
