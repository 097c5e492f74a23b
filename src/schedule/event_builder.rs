//! Builds calendar events from qualifying rows.

use super::day_codes::{translate_day_codes, Weekday};
use super::meeting_pattern::MeetingPattern;
use super::ScheduleError;
use crate::spreadsheet::SourceRow;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::Serialize;

/// Weekly repetition on a set of weekdays, ending at `until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyRecurrence {
    pub days: Vec<Weekday>,
    pub until: NaiveDateTime,
}

/// One class meeting series. `start` and `end` bound the first meeting;
/// the recurrence carries it through the term. Times are floating
/// (no timezone), as written in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub recurrence: WeeklyRecurrence,
    /// Sheet row the event came from.
    pub source_row: u32,
}

/// Parse an export date such as `8/28/23`.
///
/// The export writes years with two digits; those are always read as
/// 20YY. Four-digit years are taken as written.
pub fn parse_source_date(text: &str) -> Result<NaiveDate, String> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(format!("Invalid date '{}'. Expected M/D/YY", text));
    };

    let year = match year.len() {
        2 => format!("20{}", year),
        4 => year.to_string(),
        _ => return Err(format!("Invalid year in date '{}'", text)),
    };

    let month: u32 = month.parse().map_err(|_| format!("Invalid month in date '{}'", text))?;
    let day: u32 = day.parse().map_err(|_| format!("Invalid day in date '{}'", text))?;
    let year: i32 = year.parse().map_err(|_| format!("Invalid year in date '{}'", text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| format!("Date '{}' does not exist", text))
}

/// Parse a time of day by splitting on ':' into hour and minute.
///
/// A trailing AM/PM after the minutes is applied, so "1:00 PM" is 13:00;
/// without it the hour is read as 24-hour.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, String> {
    let (hour, rest) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("Invalid time '{}'. Expected H:MM", text))?;

    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (minute, suffix) = rest.split_at(digits_end);

    let hour: u32 = hour.trim().parse().map_err(|_| format!("Invalid hour in time '{}'", text))?;
    let minute: u32 = minute.parse().map_err(|_| format!("Invalid minute in time '{}'", text))?;

    let hour = match suffix.trim().to_ascii_uppercase().as_str() {
        "" => hour,
        "AM" if (1..=12).contains(&hour) => hour % 12,
        "PM" if (1..=12).contains(&hour) => hour % 12 + 12,
        _ => return Err(format!("Invalid time '{}'", text)),
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| format!("Time '{}' is out of range", text))
}

/// Build the event for a qualifying row.
pub fn build_event(row: &SourceRow) -> Result<CalendarEvent, ScheduleError> {
    let malformed = |reason: String| ScheduleError::MalformedRow { row: row.line, reason };

    let pattern = MeetingPattern::parse(row.meeting_patterns().unwrap_or(""))
        .ok_or_else(|| malformed("No meeting pattern".to_string()))?;

    let start_time = parse_time_of_day(pattern.start_time).map_err(&malformed)?;
    let end_time = parse_time_of_day(pattern.end_time).map_err(&malformed)?;

    let first_day = row
        .start_date()
        .ok_or_else(|| malformed("Missing Start Date".to_string()))
        .and_then(|d| parse_source_date(d).map_err(&malformed))?;
    let last_day = row
        .end_date()
        .ok_or_else(|| malformed("Missing End Date".to_string()))
        .and_then(|d| parse_source_date(d).map_err(&malformed))?;

    let event = CalendarEvent {
        title: row.course_listing().unwrap_or_default().to_string(),
        description: format!(
            "{} with {}",
            row.section().unwrap_or_default(),
            row.instructor().unwrap_or_default()
        ),
        location: pattern.location.to_string(),
        start: first_day.and_time(start_time),
        end: first_day.and_time(end_time),
        recurrence: WeeklyRecurrence {
            days: translate_day_codes(pattern.days),
            until: last_day.and_time(end_time),
        },
        source_row: row.line,
    };
    debug!("Row {}: built event '{}' starting {}", row.line, event.title, event.start);
    Ok(event)
}
