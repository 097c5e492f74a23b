//! Reads events back out of an ICS payload with the `ical` parser.

use crate::schedule::Weekday;
use chrono::NaiveDateTime;
use ical::IcalParser;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub tzid: Option<String>,
    pub days: Vec<Weekday>,
    /// UNTIL as written; a trailing `Z` marks UTC.
    pub until: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("Calendar file could not be parsed: {0}")]
pub struct ReadError(String);

/// Every VEVENT in every VCALENDAR of the payload, in file order.
pub fn read_events(payload: &str) -> Result<Vec<ParsedEvent>, ReadError> {
    let parser = IcalParser::new(payload.as_bytes());
    let mut events = Vec::new();

    for calendar in parser {
        let calendar = calendar.map_err(|e| ReadError(e.to_string()))?;
        for vevent in calendar.events {
            let mut parsed = ParsedEvent::default();
            for prop in vevent.properties {
                let Some(value) = prop.value else { continue };
                match prop.name.as_str() {
                    "UID" => parsed.uid = Some(value),
                    "SUMMARY" => parsed.summary = Some(unescape(&value)),
                    "DESCRIPTION" => parsed.description = Some(unescape(&value)),
                    "LOCATION" => parsed.location = Some(unescape(&value)),
                    "DTSTART" => {
                        parsed.tzid = tzid_param(prop.params.as_deref());
                        parsed.start = parse_date_time(&value);
                    }
                    "DTEND" => parsed.end = parse_date_time(&value),
                    "RRULE" => {
                        for part in value.split(';') {
                            match part.split_once('=') {
                                Some(("BYDAY", days)) => {
                                    parsed.days = days.split(',').filter_map(Weekday::from_abbreviation).collect();
                                }
                                Some(("UNTIL", until)) => parsed.until = Some(until.to_string()),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            events.push(parsed);
        }
    }

    Ok(events)
}

fn tzid_param(params: Option<&[(String, Vec<String>)]>) -> Option<String> {
    params?
        .iter()
        .find(|(name, _)| name == "TZID")
        .and_then(|(_, values)| values.first().cloned())
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y%m%dT%H%M%S").ok()
}

fn unescape(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\N", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}
