//! Selection of rows that become calendar events.

use super::day_codes::translate_day_codes;
use super::meeting_pattern::MeetingPattern;
use crate::spreadsheet::SourceRow;
use log::debug;

pub const DEFAULT_ALLOWED_STATUSES: [&str; 2] = ["Registered", "Waitlisted"];

/// Registration status prefixes a row must carry to qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    allowed_statuses: Vec<String>,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_STATUSES)
    }
}

/// Why a row was left out. Exclusions are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    NoMeetingPattern,
    /// The pattern matched but names no recognised day, e.g. `- | ...`.
    NoMeetingDays,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub seen: usize,
    pub qualifying: usize,
    pub without_pattern: usize,
    pub without_days: usize,
    pub by_status: usize,
}

impl RowFilter {
    pub fn new<I, S>(allowed_statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { allowed_statuses: allowed_statuses.into_iter().map(Into::into).collect() }
    }

    pub fn allowed_statuses(&self) -> &[String] {
        &self.allowed_statuses
    }

    /// The meeting pattern checks run first, so a row with neither a pattern
    /// nor an allowed status is reported as `NoMeetingPattern`.
    pub fn check(&self, row: &SourceRow) -> Result<(), Exclusion> {
        let pattern = MeetingPattern::parse(row.meeting_patterns().unwrap_or(""))
            .ok_or(Exclusion::NoMeetingPattern)?;
        if translate_day_codes(pattern.days).is_empty() {
            return Err(Exclusion::NoMeetingDays);
        }
        let status = row.registration_status().unwrap_or("");
        if !self.allowed_statuses.iter().any(|allowed| status.starts_with(allowed.as_str())) {
            return Err(Exclusion::Status);
        }
        Ok(())
    }

    pub fn is_qualifying(&self, row: &SourceRow) -> bool {
        self.check(row).is_ok()
    }

    /// Qualifying rows in their original order.
    pub fn qualifying_rows<'a>(&self, rows: &'a [SourceRow]) -> (Vec<&'a SourceRow>, FilterStats) {
        let mut stats = FilterStats { seen: rows.len(), ..Default::default() };
        let mut selected = Vec::new();
        for row in rows {
            match self.check(row) {
                Ok(()) => selected.push(row),
                Err(Exclusion::NoMeetingPattern) => {
                    debug!("Row {}: no meeting pattern, skipped", row.line);
                    stats.without_pattern += 1;
                }
                Err(Exclusion::NoMeetingDays) => {
                    debug!("Row {}: meeting pattern has no days, skipped", row.line);
                    stats.without_days += 1;
                }
                Err(Exclusion::Status) => {
                    debug!(
                        "Row {}: registration status {:?} not exported",
                        row.line,
                        row.registration_status()
                    );
                    stats.by_status += 1;
                }
            }
        }
        stats.qualifying = selected.len();
        (selected, stats)
    }
}

/// Default-filter shortcut.
pub fn is_qualifying(row: &SourceRow) -> bool {
    RowFilter::default().is_qualifying(row)
}

/// Default-filter shortcut.
pub fn qualifying_rows(rows: &[SourceRow]) -> Vec<&SourceRow> {
    RowFilter::default().qualifying_rows(rows).0
}
