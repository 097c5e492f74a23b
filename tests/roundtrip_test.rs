use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schedule_export::export::{read_events, ExportOptions, IcsExporter};
use schedule_export::pipeline::Pipeline;
use schedule_export::schedule::{extract_events, RowFilter};
use schedule_export::spreadsheet::*;

fn rows() -> Vec<SourceRow> {
    let courses = [
        ("CS 101", "001", "MWF | 9:00 AM - 9:50 AM | Room 204", "Smith"),
        ("MATH 220", "002", "TR | 11:00 AM - 12:15 PM | Hall 3", "Jones"),
        ("PHYS 150", "L01", "W | 13:00 - 15:50 | Lab 2", "Nguyen"),
    ];
    courses
        .iter()
        .enumerate()
        .map(|(idx, (course, section, pattern, instructor))| {
            SourceRow::from_pairs(
                idx as u32 + 2,
                [
                    (COURSE_LISTING, *course),
                    (SECTION, *section),
                    (MEETING_PATTERNS, *pattern),
                    (REGISTRATION_STATUS, "Registered"),
                    (INSTRUCTOR, *instructor),
                    (START_DATE, "1/8/24"),
                    (END_DATE, "4/26/24"),
                ],
            )
        })
        .collect()
}

#[test]
fn serialized_events_read_back() {
    let events = extract_events(&rows()).unwrap();
    let ics = IcsExporter::default().export(&events).unwrap();
    let parsed = read_events(&ics).unwrap();

    assert_eq!(parsed.len(), events.len());
    for (original, read) in events.iter().zip(&parsed) {
        assert_eq!(read.summary.as_deref(), Some(original.title.as_str()));
        assert_eq!(read.description.as_deref(), Some(original.description.as_str()));
        assert_eq!(read.start, Some(original.start));
        assert_eq!(read.end, Some(original.end));
        assert_eq!(read.days, original.recurrence.days);
        assert_eq!(read.tzid, None);
    }
}

#[test]
fn timezone_export_reads_back_with_tzid() {
    let events = extract_events(&rows()).unwrap();
    let exporter = IcsExporter::new(ExportOptions {
        timezone: Some(chrono_tz::America::Chicago),
        ..Default::default()
    });
    let parsed = read_events(&exporter.export(&events).unwrap()).unwrap();
    assert_eq!(parsed[0].tzid.as_deref(), Some("America/Chicago"));
    // 9:50 CDT on 2024-04-26 is 14:50 UTC
    assert_eq!(parsed[0].until.as_deref(), Some("20240426T145000Z"));
}

#[test]
fn export_is_byte_identical_across_runs() {
    let pipeline = Pipeline::new(RowFilter::default(), ExportOptions::default());
    let first = pipeline.render(&rows()).unwrap();
    let second = pipeline.render(&rows()).unwrap();
    assert_eq!(first, second);

    let stamped = Pipeline::new(
        RowFilter::default(),
        ExportOptions {
            stamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        },
    );
    let stamped_once = stamped.render(&rows()).unwrap();
    assert_eq!(stamped_once, stamped.render(&rows()).unwrap());
    assert!(stamped_once.contains("DTSTAMP:20240101T000000Z"));
}

#[test]
fn empty_schedule_is_a_valid_calendar() {
    let ics = Pipeline::default().render(&[]).unwrap();
    assert!(read_events(&ics).unwrap().is_empty());
}

#[test]
fn text_with_commas_and_semicolons_reads_back() {
    let row = SourceRow::from_pairs(
        2,
        [
            (COURSE_LISTING, "ENGL 101; Writing, Rhetoric"),
            (SECTION, "001"),
            (MEETING_PATTERNS, "MWF | 9:00 AM - 9:50 AM | Hall 3; Room 2, East"),
            (REGISTRATION_STATUS, "Registered"),
            (INSTRUCTOR, "Smith, John"),
            (START_DATE, "1/8/24"),
            (END_DATE, "4/26/24"),
        ],
    );
    let events = extract_events(&[row]).unwrap();
    let parsed = read_events(&IcsExporter::default().export(&events).unwrap()).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].summary.as_deref(), Some("ENGL 101; Writing, Rhetoric"));
    assert_eq!(parsed[0].description.as_deref(), Some("001 with Smith, John"));
    assert_eq!(parsed[0].location.as_deref(), Some("Hall 3; Room 2, East"));
}
