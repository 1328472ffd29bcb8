//! Tests for calendar document serialization.

use chrono::{DateTime, TimeZone, Utc};
use exam_schedule::ics::{escape_text, event_uid, fold_line, resolve_timezone, sanitize_uid_part};
use exam_schedule::{serialize_calendar, serialize_calendar_at, ExportOptions, ScheduleError, SessionRecord};

fn session(date: &str, time: &str, subject: &str) -> SessionRecord {
    SessionRecord {
        exam_date: date.to_string(),
        exam_time: time.to_string(),
        subject: subject.to_string(),
        grade: "G10".to_string(),
        class_num: "3".to_string(),
        minutes: "120".to_string(),
        location: "Room 101".to_string(),
        proctor1: "Teacher A".to_string(),
        proctor2: Some("Teacher B".to_string()),
        num_of_students: "2".to_string(),
        students: vec!["Alice".to_string(), "Bob".to_string()],
    }
}

fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 8, 30, 0).unwrap()
}

fn export(owner: &str, sessions: &[SessionRecord], options: &ExportOptions) -> String {
    serialize_calendar_at(owner, sessions, options, stamp()).expect("export should succeed")
}

/// Undo line folding so assertions can look at logical lines.
fn unfold(doc: &str) -> String {
    doc.replace("\r\n ", "")
}

fn logical_lines(doc: &str) -> Vec<String> {
    unfold(doc)
        .split("\r\n")
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn values_of(doc: &str, property: &str) -> Vec<String> {
    logical_lines(doc)
        .into_iter()
        .filter_map(|line| line.strip_prefix(property).map(str::to_string))
        .collect()
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

#[test]
fn compact_time_produces_zoned_start_and_end() {
    let doc = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &ExportOptions::new("exam"));

    assert!(doc.contains("DTSTART;TZID=Asia/Shanghai:20241220T080000\r\n"));
    assert!(doc.contains("DTEND;TZID=Asia/Shanghai:20241220T100000\r\n"));
}

#[test]
fn clock_time_produces_same_timestamps() {
    let options = ExportOptions::new("exam");
    let compact = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &options);
    let clock = export("Alice", &[session("2024.12.20", "08:00-10:00", "Math")], &options);

    assert_eq!(values_of(&compact, "DTSTART"), values_of(&clock, "DTSTART"));
    assert_eq!(values_of(&compact, "DTEND"), values_of(&clock, "DTEND"));
}

#[test]
fn configured_timezone_is_used() {
    let options = ExportOptions {
        timezone: "America/New_York".to_string(),
        ..ExportOptions::new("exam")
    };
    let doc = export("Alice", &[session("2024.12.20", "1330-1500", "Math")], &options);

    assert!(doc.contains("X-WR-TIMEZONE:America/New_York\r\n"));
    assert!(doc.contains("DTSTART;TZID=America/New_York:20241220T133000\r\n"));
}

#[test]
fn unknown_or_empty_timezone_falls_back() {
    for tz in ["Mars/Olympus_Mons", "", "   "] {
        let options = ExportOptions {
            timezone: tz.to_string(),
            ..ExportOptions::new("exam")
        };
        let doc = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &options);
        assert!(
            doc.contains("DTSTART;TZID=Asia/Shanghai:20241220T080000"),
            "timezone {tz:?} should fall back to Asia/Shanghai"
        );
    }
    assert_eq!(resolve_timezone("Europe/Berlin").name(), "Europe/Berlin");
}

#[test]
fn dtstamp_is_utc_and_shared() {
    let doc = export(
        "Alice",
        &[session("2024.12.20", "800-1000", "Math"), session("2024.12.21", "800-1000", "English")],
        &ExportOptions::new("exam"),
    );
    let stamps = values_of(&doc, "DTSTAMP:");
    assert_eq!(stamps, vec!["20241201T083000Z", "20241201T083000Z"]);
}

// ---------------------------------------------------------------------------
// Document structure
// ---------------------------------------------------------------------------

#[test]
fn empty_session_list_has_no_events() {
    let doc = export("Alice", &[], &ExportOptions::new("Empty"));

    assert_eq!(
        doc,
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//examschedule//ics export//EN\r\n\
         CALSCALE:GREGORIAN\r\n\
         METHOD:PUBLISH\r\n\
         X-WR-CALNAME:Empty\r\n\
         X-WR-TIMEZONE:Asia/Shanghai\r\n\
         END:VCALENDAR\r\n"
    );
    assert!(!doc.contains("BEGIN:VEVENT"));
}

#[test]
fn event_has_expected_properties_in_order() {
    let doc = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &ExportOptions::new("exam"));
    let lines = logical_lines(&doc);

    let begin = lines.iter().position(|l| l == "BEGIN:VEVENT").expect("event start");
    let names: Vec<&str> = lines[begin..]
        .iter()
        .map(|l| l.split([':', ';']).next().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "BEGIN", "UID", "DTSTAMP", "DTSTART", "DTEND", "SUMMARY", "LOCATION", "DESCRIPTION",
            "END", "END"
        ]
    );
    assert!(lines.contains(&"SUMMARY:Math (G103)".to_string()));
    assert!(lines.contains(&"LOCATION:Room 101".to_string()));
}

#[test]
fn every_line_ends_with_crlf() {
    let doc = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &ExportOptions::new("exam"));

    assert!(doc.ends_with("\r\n"));
    let bare_newlines = doc
        .char_indices()
        .filter(|&(i, c)| c == '\n' && (i == 0 || doc.as_bytes()[i - 1] != b'\r'))
        .count();
    assert_eq!(bare_newlines, 0, "no LF without a preceding CR");
}

#[test]
fn events_are_sorted_by_date_time_subject() {
    let doc = export(
        "Alice",
        &[
            session("2024.12.21", "800-1000", "English"),
            session("2024.12.20", "1400-1600", "Physics"),
            session("2024.12.20", "1400-1600", "Chemistry"),
            session("2024.12.20", "1000-1200", "Math"),
        ],
        &ExportOptions::new("exam"),
    );

    let summaries = values_of(&doc, "SUMMARY:");
    assert_eq!(
        summaries,
        vec![
            "Math (G103)",
            "Chemistry (G103)",
            "Physics (G103)",
            "English (G103)"
        ]
    );
}

#[test]
fn description_lists_owner_time_proctors_and_count() {
    let doc = export("Alice", &[session("2024.12.20", "800-1000", "Math")], &ExportOptions::new("exam"));
    let description = &values_of(&doc, "DESCRIPTION:")[0];

    assert_eq!(
        description,
        "Owner: Alice\\nTime: 2024.12.20 800-1000\\nDuration: 120 minutes\\n\
         Proctor(s): Teacher A / Teacher B\\nStudents: 2"
    );
}

#[test]
fn roster_only_when_requested() {
    let sessions = [session("2024.12.20", "800-1000", "Math")];

    let without = export("Alice", &sessions, &ExportOptions::new("exam"));
    assert!(!unfold(&without).contains("Roster:"));

    let options = ExportOptions {
        include_roster: true,
        ..ExportOptions::new("exam")
    };
    let with = export("Alice", &sessions, &options);
    assert!(unfold(&with).contains("\\nRoster: Alice\\, Bob"));
}

#[test]
fn single_proctor_has_no_separator() {
    let mut s = session("2024.12.20", "800-1000", "Math");
    s.proctor2 = None;
    let doc = export("Alice", &[s], &ExportOptions::new("exam"));
    assert!(unfold(&doc).contains("Proctor(s): Teacher A\\n"));
}

#[test]
fn calendar_name_is_escaped() {
    let doc = export("Alice", &[], &ExportOptions::new("exam: Alice, Bob; C"));
    assert!(doc.contains("X-WR-CALNAME:exam: Alice\\, Bob\\; C\r\n"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn malformed_date_aborts_export() {
    let sessions = [
        session("2024.12.20", "800-1000", "Math"),
        session("INVALID DATE", "800-1000", "Physics"),
    ];
    let result = serialize_calendar("Alice", &sessions, &ExportOptions::new("exam"));
    assert!(matches!(result, Err(ScheduleError::MalformedDate(_))));
}

#[test]
fn malformed_time_aborts_export() {
    let result = serialize_calendar(
        "Alice",
        &[session("2024.12.20", "INVALID TIME", "Math")],
        &ExportOptions::new("exam"),
    );
    assert!(matches!(result, Err(ScheduleError::MalformedTime(_))));

    let result = serialize_calendar(
        "Alice",
        &[session("2024.12.20", "80-1000", "Math")],
        &ExportOptions::new("exam"),
    );
    assert!(matches!(result, Err(ScheduleError::MalformedTimeToken(_))));
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn uid_is_derived_from_content() {
    let uid = event_uid(
        "Alice Smith",
        &session("2024.12.20", "800-1000", "Math"),
        "exam.example.com",
    );
    assert_eq!(uid, "Alice-Smith-2024.12.20-800-1000-Math@exam.example.com");
}

#[test]
fn uids_are_identical_across_exports() {
    let sessions = [
        session("2024.12.20", "800-1000", "Math"),
        session("2024.12.21", "13:30-15:00", "English Lit"),
    ];
    let options = ExportOptions::new("exam");

    let first = serialize_calendar("Alice", &sessions, &options).unwrap();
    let second = serialize_calendar("Alice", &sessions, &options).unwrap();
    assert_eq!(values_of(&first, "UID:"), values_of(&second, "UID:"));

    let pinned_a = export("Alice", &sessions, &options);
    let pinned_b = export("Alice", &sessions, &options);
    assert_eq!(pinned_a, pinned_b, "fixed DTSTAMP makes the whole document reproducible");
}

#[test]
fn uid_part_sanitizing() {
    assert_eq!(sanitize_uid_part("--a  b--c--"), "a-b-c");
    assert_eq!(sanitize_uid_part("  Math!! 101 "), "Math-101");
    assert_eq!(sanitize_uid_part("v1.2_final"), "v1.2_final");
    assert_eq!(sanitize_uid_part("张三"), "");
    assert_eq!(sanitize_uid_part("张三 Lee"), "Lee");
}

// ---------------------------------------------------------------------------
// Escaping and folding
// ---------------------------------------------------------------------------

#[test]
fn escaping_order_does_not_double_escape() {
    assert_eq!(escape_text(r"a\b;c,d"), r"a\\b\;c\,d");
    assert_eq!(escape_text("x\r\ny\nz\rw"), r"x\ny\nz\nw");
    assert_eq!(escape_text(r"\n"), r"\\n");
}

#[test]
fn short_lines_are_not_folded() {
    let line = "a".repeat(75);
    assert_eq!(fold_line(&line), line);
}

#[test]
fn long_lines_fold_every_75_characters() {
    let line = "x".repeat(200);
    let folded = fold_line(&line);
    let segments: Vec<&str> = folded.split("\r\n").collect();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].len(), 75);
    assert_eq!(segments[1], format!(" {}", "x".repeat(75)));
    assert_eq!(segments[2], format!(" {}", "x".repeat(50)));
    assert_eq!(folded.replace("\r\n ", ""), line);
}

#[test]
fn folding_counts_characters_not_bytes() {
    let line = "考".repeat(100);
    let folded = fold_line(&line);
    let segments: Vec<&str> = folded.split("\r\n").collect();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].chars().count(), 75);
    assert_eq!(segments[1].chars().count(), 26);
}

#[test]
fn long_descriptions_are_folded_in_documents() {
    let mut s = session("2024.12.20", "800-1000", "Math");
    s.students = (1..=40).map(|i| format!("Student {i:02}")).collect();
    let options = ExportOptions {
        include_roster: true,
        ..ExportOptions::new("exam")
    };
    let doc = export("Alice", &[s], &options);

    for physical in doc.split("\r\n") {
        assert!(physical.chars().count() <= 76, "line too long: {physical:?}");
    }
    assert!(unfold(&doc).contains("Student 40"));
}
