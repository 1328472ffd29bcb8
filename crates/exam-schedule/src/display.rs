//! Short labels for listing sessions on a terminal or in a search result.
//!
//! Values that do not parse are shown verbatim; a listing never fails.

use chrono::Datelike;

use crate::fields::{parse_date, parse_time_range};
use crate::session::SessionRecord;

/// `2024.12.20` → `12/20`.
pub fn short_date(text: &str) -> String {
    match parse_date(text) {
        Ok(date) => format!("{}/{}", date.month(), date.day()),
        Err(_) => text.to_string(),
    }
}

/// `800-1000` → `08:00--10:00`. An en dash is accepted as the range separator.
pub fn time_label(text: &str) -> String {
    match parse_time_range(&text.replace('–', "-")) {
        Ok(range) => format!(
            "{}--{}",
            range.start.format("%H:%M"),
            range.end.format("%H:%M")
        ),
        Err(_) => text.to_string(),
    }
}

/// One line per session: date, time, subject with grade and class, room,
/// proctors.
pub fn session_line(session: &SessionRecord) -> String {
    format!(
        "{} {}  {} {}{}  {}  [{}]",
        short_date(&session.exam_date),
        time_label(&session.exam_time),
        session.subject,
        session.grade,
        session.class_num,
        session.location,
        session.proctor_label()
    )
}
