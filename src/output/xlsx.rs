use rust_xlsxwriter::{Format, Workbook, XlsxError};
use crate::error::Result;
use crate::output::Cell;

/// Writes the rows to an Excel (.xlsx) file with a bold header row.
///
/// # Errors
///
/// Returns an error if there is an issue writing the file.
pub fn output_rows(path: &str, headers: &[String], rows: &[Vec<Cell>]) -> Result<()> {
    write_excel_file(path, headers, rows)?;
    Ok(())
}

fn write_excel_file(path: &str, headers: &[String], rows: &[Vec<Cell>]) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let bold = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    // Header row (row 0, 0-indexed column)
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col_idx as u16, header, &bold)?;
    }

    // Rows (row 1 and beyond)
    for (row_idx, row) in rows.iter().enumerate() {
        let row_idx = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                Cell::String(s) => {
                    worksheet.write_with_format(row_idx, col_idx as u16, s, &wrap)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_idx, col_idx as u16, *n)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
