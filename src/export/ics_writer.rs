//! ICS serialization of calendar events, built with `icalendar`.

use super::ExportError;
use crate::schedule::day_codes::byday_list;
use crate::schedule::{validate_event, CalendarEvent};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event, Property};
use log::{debug, error, info};

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";
const ICS_DATETIME_UTC: &str = "%Y%m%dT%H%M%SZ";
const UID_DOMAIN: &str = "schedule-export";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    /// Written as X-WR-CALNAME when set.
    pub calendar_name: Option<String>,
    /// Without a timezone, times are floating.
    pub timezone: Option<Tz>,
    /// DTSTAMP for every event. Defaults to each event's start, read as UTC,
    /// so the same events always serialize to the same bytes.
    pub stamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct IcsExporter {
    options: ExportOptions,
}

impl IcsExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Serialize all events into one VCALENDAR. Any invalid event fails the
    /// whole export.
    pub fn export(&self, events: &[CalendarEvent]) -> Result<String, ExportError> {
        let mut calendar = Calendar::new();
        if let Some(name) = &self.options.calendar_name {
            calendar.name(name);
        }

        for (index, event) in events.iter().enumerate() {
            let vevent = self.to_vevent(index, event).map_err(|e| {
                error!("Failed to serialize event {}: {}", index, e);
                e
            })?;
            calendar.push(vevent);
        }

        info!("Serialized {} events", events.len());
        Ok(calendar.done().to_string())
    }

    fn to_vevent(&self, index: usize, event: &CalendarEvent) -> Result<Event, ExportError> {
        let invalid = |reason: String| ExportError::InvalidEvent {
            index,
            title: event.title.clone(),
            reason,
        };

        validate_event(event).map_err(&invalid)?;

        let until = match self.options.timezone {
            Some(tz) => to_utc(tz, &event.recurrence.until)
                .ok_or_else(|| invalid(format!("UNTIL {} does not exist in {}", event.recurrence.until, tz)))?
                .format(ICS_DATETIME_UTC)
                .to_string(),
            None => event.recurrence.until.format(ICS_DATETIME).to_string(),
        };
        let rrule = format!(
            "FREQ=WEEKLY;BYDAY={};INTERVAL=1;UNTIL={}",
            byday_list(&event.recurrence.days),
            until
        );
        debug!("Event {} RRULE: {}", index, rrule);

        let stamp = self
            .options
            .stamp
            .unwrap_or_else(|| Utc.from_utc_datetime(&event.start));

        let mut vevent = Event::new();
        vevent
            .uid(&event_uid(index, event))
            .timestamp(stamp)
            .summary(&event.title)
            .description(&event.description)
            .add_property("LOCATION", event.location.as_str())
            .append_property(self.date_time_property("DTSTART", &event.start))
            .append_property(self.date_time_property("DTEND", &event.end))
            .add_property("RRULE", rrule);

        Ok(vevent.done())
    }

    fn date_time_property(&self, name: &str, value: &NaiveDateTime) -> Property {
        let mut prop = Property::new(name, value.format(ICS_DATETIME).to_string());
        if let Some(tz) = self.options.timezone {
            prop.add_parameter("TZID", tz.name());
        }
        prop.done()
    }
}

fn to_utc(tz: Tz, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(local).earliest().map(|dt| dt.with_timezone(&Utc))
}

/// Stable per-event UID built from position, first meeting and title.
fn event_uid(index: usize, event: &CalendarEvent) -> String {
    let slug: String = event
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!(
        "{}-{}-{}@{}",
        index + 1,
        event.start.format(ICS_DATETIME),
        slug.trim_matches('-'),
        UID_DOMAIN
    )
}
