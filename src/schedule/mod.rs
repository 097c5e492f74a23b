//! Row-to-event transformation.
//
// Rows -> filter -> meeting pattern -> event. Filtering never fails; rows
// without a meeting time, without meeting days, or with an excluded status
// are dropped.

use crate::spreadsheet::SourceRow;
use log::info;

pub mod day_codes;
pub mod event_builder;
pub mod meeting_pattern;
pub mod row_filter;
pub mod validation;

pub use day_codes::{translate_day_codes, Weekday};
pub use event_builder::{build_event, parse_source_date, parse_time_of_day, CalendarEvent, WeeklyRecurrence};
pub use meeting_pattern::MeetingPattern;
pub use row_filter::{is_qualifying, qualifying_rows, Exclusion, FilterStats, RowFilter};
pub use validation::validate_event;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Row {row} could not be turned into an event: {reason}")]
    MalformedRow { row: u32, reason: String },
}

/// Events for every qualifying row, in row order. No qualifying rows is
/// not an error.
pub fn extract_events(rows: &[SourceRow]) -> Result<Vec<CalendarEvent>, ScheduleError> {
    extract_events_with(&RowFilter::default(), rows)
}

pub fn extract_events_with(
    filter: &RowFilter,
    rows: &[SourceRow],
) -> Result<Vec<CalendarEvent>, ScheduleError> {
    let (selected, stats) = filter.qualifying_rows(rows);
    info!(
        "{} of {} rows qualify ({} without meeting time, {} without meeting days, {} excluded by status)",
        stats.qualifying, stats.seen, stats.without_pattern, stats.without_days, stats.by_status
    );
    selected.into_iter().map(build_event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::*;

    fn row(line: u32, course: &str, pattern: &str, status: &str) -> SourceRow {
        SourceRow::from_pairs(
            line,
            [
                (COURSE_LISTING, course),
                (SECTION, "001"),
                (MEETING_PATTERNS, pattern),
                (REGISTRATION_STATUS, status),
                (INSTRUCTOR, "Smith"),
                (START_DATE, "8/28/23"),
                (END_DATE, "12/15/23"),
            ],
        )
    }

    #[test]
    fn test_extract_events_in_order() {
        let rows = vec![
            row(1, "Header", "Meeting Patterns", "Registration Status"),
            row(2, "CS 101", "MWF | 9:00 AM - 9:50 AM | Room 204", "Registered"),
            row(3, "CS 190", "Online", "Registered"),
            row(4, "HIST 110", "TR | 11:00 AM - 12:15 PM | Hall 1", "Dropped"),
            row(5, "PHYS 150", "TR | 2:00 PM - 3:15 PM | Lab 2", "Waitlisted"),
        ];
        let events = extract_events(&rows).unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["CS 101", "PHYS 150"]);
    }

    #[test]
    fn test_extract_events_skips_rows_without_days() {
        let rows = vec![
            row(2, "CS 101", "MWF | 9:00 AM - 9:50 AM | Room 204", "Registered"),
            row(3, "CS 199", "- | 9:00 AM - 9:50 AM | TBA", "Registered"),
            row(4, "PHYS 150", "TR | 2:00 PM - 3:15 PM | Lab 2", "Registered"),
        ];
        let events = extract_events(&rows).unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["CS 101", "PHYS 150"]);
    }

    #[test]
    fn test_extract_events_location_with_pipe() {
        let rows = vec![
            row(2, "CS 101", "MWF | 9:00 AM - 9:50 AM | Bldg A | Room 2", "Registered"),
            row(3, "PHYS 150", "TR | 2:00 PM - 3:15 PM | Lab 2", "Registered"),
        ];
        let events = extract_events(&rows).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].location, "Bldg A | Room 2");
        assert_eq!(events[0].end.format("%H:%M").to_string(), "09:50");
    }

    #[test]
    fn test_extract_events_empty() {
        assert!(extract_events(&[]).unwrap().is_empty());
        let rows = vec![row(1, "CS 190", "Online", "Registered")];
        assert!(extract_events(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_extract_events_reports_malformed_row() {
        let broken = row(9, "CS 101", "MWF | 9 AM - 10 AM | Room 1", "Registered");
        let err = extract_events(&[broken]).unwrap_err();
        assert!(err.to_string().contains("Row 9"));
    }
}
