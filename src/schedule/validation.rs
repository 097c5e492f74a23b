//! Validation of built events before they are serialized.
//
// A single failing event aborts the whole export; no partial file is written.

use super::event_builder::CalendarEvent;
use log::warn;

/// Check that an event can be written as a weekly recurring VEVENT.
pub fn validate_event(event: &CalendarEvent) -> Result<(), String> {
    if event.title.trim().is_empty() {
        return Err("Event title cannot be empty".to_string());
    }

    if event.title.len() > 250 {
        warn!("Event title is very long: {} characters", event.title.len());
    }

    if event.recurrence.days.is_empty() {
        return Err(format!("'{}' has no meeting days", event.title));
    }

    if event.end <= event.start {
        return Err(format!(
            "'{}' ends at {} which is not after its start {}",
            event.title,
            event.end.format("%H:%M"),
            event.start.format("%H:%M")
        ));
    }

    if event.recurrence.until < event.start {
        return Err(format!(
            "'{}' repeats until {} which is before its first meeting on {}",
            event.title,
            event.recurrence.until.format("%Y-%m-%d"),
            event.start.format("%Y-%m-%d")
        ));
    }

    Ok(())
}
