use invoice_core::{CellValue, Profile, Record};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

/// Sheet name of the exported summary.
pub const SHEET_NAME: &str = "Summary";

/// Default artifact filename offered to the user.
pub const DEFAULT_FILENAME: &str = "Invoice_Summary.xlsx";

/// MIME type of the exported artifact.
pub const MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("record for {actual:?} in a {expected:?} batch")]
    ProfileMismatch { expected: Profile, actual: Profile },
}

/// Serialize records to a single-sheet `.xlsx` buffer.
///
/// Header row = the profile's column names in schema order, one data row
/// per record in batch order. Numbers are written as numbers, absent
/// fields as empty cells, timestamps as their formatted string form.
/// Pure serialization; nothing is recomputed.
pub fn export_records(profile: Profile, records: &[Record]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in profile.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (index, record) in records.iter().enumerate() {
        if record.profile() != profile {
            return Err(ExportError::ProfileMismatch {
                expected: profile,
                actual: record.profile(),
            });
        }
        let row = (index + 1) as u32;
        for (col, cell) in record.cells().iter().enumerate() {
            let col = col as u16;
            match cell {
                None => {}
                Some(CellValue::Text(s)) => {
                    sheet.write_string(row, col, s)?;
                }
                Some(CellValue::Integer(n)) => {
                    sheet.write_number(row, col, *n as f64)?;
                }
                Some(CellValue::Number(v)) => {
                    sheet.write_number(row, col, *v)?;
                }
                Some(CellValue::Timestamp(ts)) => {
                    sheet.write_string(row, col, ts.format("%Y-%m-%d %H:%M:%S").to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
