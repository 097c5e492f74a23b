//! Excel (.xlsx) variant of the registration export, read with calamine.

use super::{DecodeError, SourceRow, DECODE_REGION};
use calamine::{Data, Reader, Xlsx};
use log::{debug, warn};
use std::io::Cursor;

/// Decode the first worksheet of an XLSX workbook, region A1:L50.
pub fn decode_xlsx(bytes: &[u8]) -> Result<Vec<SourceRow>, DecodeError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| DecodeError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.len() > 1 {
        warn!(
            "Workbook has {} sheets, only '{}' is read",
            sheet_names.len(),
            sheet_names[0]
        );
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoWorksheet)?
        .map_err(|e| DecodeError::Workbook(e.to_string()))?;

    let mut rows = Vec::new();
    for row_idx in 0..DECODE_REGION.rows {
        let mut row = SourceRow::new(row_idx + 1);
        for col_idx in 0..DECODE_REGION.columns {
            // calamine positions are absolute, so A1 is (0, 0) regardless of
            // where the used range starts.
            if let Some(text) = range.get_value((row_idx, col_idx)).and_then(cell_text) {
                row.set(col_idx as usize, &text);
            }
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }

    debug!("Decoded {} rows from XLSX export", rows.len());
    Ok(rows)
}

/// Display text of a cell, the way the export shows it on screen.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string().to_uppercase(),
        // The export formats dates as M/D/YY.
        Data::DateTime(dt) => dt.as_datetime()?.format("%-m/%-d/%y").to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    Some(text)
}
