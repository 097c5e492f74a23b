//! Meeting pattern text: `<days> | <start> - <end> | <location>`.

use once_cell::sync::Lazy;
use regex::Regex;

static MEETING_PATTERN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([MTWRFSU-]*) \| (.*?) - (.*?) \| ?(.*)").expect("meeting pattern regex is valid")
});

/// The four captures of a meeting pattern. Time strings are kept as text;
/// `event_builder` turns them into times of day. The end time stops at the
/// first ` | `, so the location may itself contain pipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingPattern<'a> {
    pub days: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub location: &'a str,
}

impl<'a> MeetingPattern<'a> {
    /// Returns `None` when the text holds no meeting pattern, e.g. online
    /// sections without a scheduled time. Multi-line fields use the first
    /// line that matches.
    pub fn parse(text: &'a str) -> Option<Self> {
        let caps = MEETING_PATTERN_RE.captures(text)?;
        Some(Self {
            days: caps.get(1).map_or("", |m| m.as_str()),
            start_time: caps.get(2).map_or("", |m| m.as_str().trim()),
            end_time: caps.get(3).map_or("", |m| m.as_str().trim()),
            location: caps.get(4).map_or("", |m| m.as_str().trim()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_pattern() {
        let pattern = MeetingPattern::parse("MWF | 9:00 AM - 9:50 AM | Room 204").unwrap();
        assert_eq!(
            pattern,
            MeetingPattern {
                days: "MWF",
                start_time: "9:00 AM",
                end_time: "9:50 AM",
                location: "Room 204",
            }
        );
    }

    #[test]
    fn test_parse_empty_location() {
        let pattern = MeetingPattern::parse("TR | 13:30 - 14:45 |").unwrap();
        assert_eq!(pattern.days, "TR");
        assert_eq!(pattern.end_time, "14:45");
        assert_eq!(pattern.location, "");
    }

    #[test]
    fn test_parse_location_with_pipe() {
        let pattern = MeetingPattern::parse("MWF | 9:00 AM - 9:50 AM | Bldg A | Room 2").unwrap();
        assert_eq!(pattern.start_time, "9:00 AM");
        assert_eq!(pattern.end_time, "9:50 AM");
        assert_eq!(pattern.location, "Bldg A | Room 2");
    }

    #[test]
    fn test_parse_placeholder_days() {
        let pattern = MeetingPattern::parse("- | 10:00 - 11:00 | Lab").unwrap();
        assert_eq!(pattern.days, "-");
    }

    #[test]
    fn test_parse_multiline_uses_first_match() {
        let text = "Online\nTR | 11:00 AM - 12:15 PM | Hall 3\nF | 1:00 PM - 2:00 PM | Lab";
        let pattern = MeetingPattern::parse(text).unwrap();
        assert_eq!(pattern.days, "TR");
        assert_eq!(pattern.location, "Hall 3");
    }

    #[test]
    fn test_no_match() {
        for text in ["Online", "", "MWF 9:00 - 9:50 Room 204", "TBA | Room 5"] {
            assert!(MeetingPattern::parse(text).is_none(), "{text}");
        }
    }
}
