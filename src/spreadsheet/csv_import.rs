//! CSV variant of the registration export.

use super::{DecodeError, SourceRow, DECODE_REGION};
use csv::ReaderBuilder;
use log::debug;

/// Decode a CSV export. Columns are positional, there is no header record,
/// and only the A1:L50 region is kept.
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<SourceRow>, DecodeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().take(DECODE_REGION.rows as usize).enumerate() {
        let record = record?;
        let mut row = SourceRow::new(idx as u32 + 1);
        for (column, field) in record.iter().take(DECODE_REGION.columns as usize).enumerate() {
            row.set(column, field.trim());
        }
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    debug!("Decoded {} rows from CSV export", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::{END_DATE, MEETING_PATTERNS};

    #[test]
    fn test_decode_csv_positional_columns() {
        let data = "\
My Enrolled Courses,,,,,,,,,,,
,CS 101,3,Graded,001,Lecture,In-Person,MWF | 9:00 AM - 9:50 AM | Room 204,Registered,Smith,8/28/23,12/15/23,extra
,,,,,,,,,,,
";
        let rows = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(""), Some("My Enrolled Courses"));
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].course_listing(), Some("CS 101"));
        assert_eq!(rows[1].get(MEETING_PATTERNS), Some("MWF | 9:00 AM - 9:50 AM | Room 204"));
        assert_eq!(rows[1].get(END_DATE), Some("12/15/23"));
    }

    #[test]
    fn test_decode_csv_stops_at_region_bounds() {
        let mut data = String::new();
        for n in 0..60 {
            data.push_str(&format!(",Course {}\n", n));
        }
        let rows = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[49].course_listing(), Some("Course 49"));
    }
}
