//! Calendar serialization: a person's sessions → RFC 5545 document.
//!
//! Output is plain text assembled line by line:
//!
//! - Events are ordered by `"<date> <time> <subject>"` so repeated exports diff cleanly.
//! - Start/end are local wall-clock times tagged with a `TZID`.
//! - Every event gets a UID derived only from its content, so re-importing
//!   an updated export replaces events instead of duplicating them.
//! - Free text is escaped and long lines are folded at 75 characters.
//!
//! Unlike extraction, a date or time that does not parse aborts the whole
//! export: there is no placeholder that yields a valid `DTSTART`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fields::{parse_date, parse_time_range};
use crate::session::SessionRecord;

/// Timezone used when none, or an unknown one, is configured.
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// UID domain used when none is configured.
pub const DEFAULT_UID_NAMESPACE: &str = "examschedule";

const PRODID: &str = "-//examschedule//ics export//EN";

/// Maximum characters per physical line before folding.
const FOLD_LIMIT: usize = 75;

const CRLF: &str = "\r\n";

/// Export settings. Deserializes from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub calendar_name: String,
    /// IANA identifier, e.g. `Asia/Shanghai`.
    pub timezone: String,
    pub uid_namespace: String,
    /// Append the full student roster to each event description.
    pub include_roster: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            calendar_name: "Exam schedule".to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            uid_namespace: DEFAULT_UID_NAMESPACE.to_string(),
            include_roster: false,
        }
    }
}

impl ExportOptions {
    pub fn new(calendar_name: impl Into<String>) -> Self {
        Self {
            calendar_name: calendar_name.into(),
            ..Self::default()
        }
    }
}

/// Serialize `sessions` into a calendar document for `owner`, stamped with
/// the current time.
///
/// # Errors
/// Returns `ScheduleError::MalformedDate`, `ScheduleError::MalformedTime` or
/// `ScheduleError::MalformedTimeToken` if any session's date or time cannot
/// be parsed. No partial document is produced.
pub fn serialize_calendar(
    owner: &str,
    sessions: &[SessionRecord],
    options: &ExportOptions,
) -> Result<String> {
    serialize_calendar_at(owner, sessions, options, Utc::now())
}

/// Same as [`serialize_calendar`], with an explicit `DTSTAMP`.
///
/// For a fixed `dtstamp` the output is a pure function of the inputs.
///
/// # Errors
/// See [`serialize_calendar`].
pub fn serialize_calendar_at(
    owner: &str,
    sessions: &[SessionRecord],
    options: &ExportOptions,
    dtstamp: DateTime<Utc>,
) -> Result<String> {
    let tz = resolve_timezone(&options.timezone);
    let tzid = escape_text(tz.name());
    let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)),
        format!("X-WR-TIMEZONE:{tzid}"),
    ];

    let mut ordered: Vec<&SessionRecord> = sessions.iter().collect();
    ordered.sort_by_cached_key(|session| sort_key(session));

    for session in ordered {
        let date = parse_date(&session.exam_date)?;
        let range = parse_time_range(&session.exam_time)?;

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:{}",
            escape_text(&event_uid(owner, session, &options.uid_namespace))
        ));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!(
            "DTSTART;TZID={tzid}:{}",
            local_timestamp(date, range.start)
        ));
        lines.push(format!(
            "DTEND;TZID={tzid}:{}",
            local_timestamp(date, range.end)
        ));
        lines.push(format!(
            "SUMMARY:{}",
            escape_text(&format!(
                "{} ({}{})",
                session.subject, session.grade, session.class_num
            ))
        ));
        lines.push(format!("LOCATION:{}", escape_text(&session.location)));
        lines.push(format!(
            "DESCRIPTION:{}",
            escape_text(&describe(owner, session, options.include_roster))
        ));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    debug!(
        owner,
        events = sessions.len(),
        timezone = tz.name(),
        "serialized calendar"
    );

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str(CRLF);
    }
    Ok(out)
}

/// Parse a configured IANA timezone, falling back to [`DEFAULT_TIMEZONE`]
/// when it is empty or unknown.
pub fn resolve_timezone(name: &str) -> Tz {
    let name = name.trim();
    if name.is_empty() {
        return Tz::Asia__Shanghai;
    }
    name.parse().unwrap_or_else(|_| {
        warn!(
            timezone = name,
            fallback = DEFAULT_TIMEZONE,
            "unknown timezone, using fallback"
        );
        Tz::Asia__Shanghai
    })
}

/// Content-derived event identifier:
/// `<owner>-<date>-<time>-<subject>@<namespace>`, each part sanitized by
/// [`sanitize_uid_part`].
pub fn event_uid(owner: &str, session: &SessionRecord, namespace: &str) -> String {
    format!(
        "{}-{}-{}-{}@{}",
        sanitize_uid_part(owner),
        sanitize_uid_part(&session.exam_date),
        sanitize_uid_part(&session.exam_time),
        sanitize_uid_part(&session.subject),
        sanitize_uid_part(namespace)
    )
}

/// Reduce `input` to `[A-Za-z0-9._-]`: whitespace and any other character
/// become a hyphen, hyphen runs collapse to one, and leading/trailing hyphens
/// are dropped. Letter case is preserved.
pub fn sanitize_uid_part(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Escape a TEXT value: backslash first, then line breaks, `;` and `,`.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace("\r\n", "\\n")
        .replace(['\n', '\r'], "\\n")
        .replace(';', "\\;")
        .replace(',', "\\,")
}

/// Fold a content line into 75-character segments joined by CRLF + space.
///
/// Counts characters, not octets, so multi-byte text is never split inside
/// a character.
pub fn fold_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= FOLD_LIMIT {
        return line.to_string();
    }

    chars
        .chunks(FOLD_LIMIT)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\r\n ")
}

fn sort_key(session: &SessionRecord) -> String {
    format!(
        "{} {} {}",
        session.exam_date, session.exam_time, session.subject
    )
}

fn local_timestamp(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%Y%m%dT%H%M%S").to_string()
}

fn describe(owner: &str, session: &SessionRecord, include_roster: bool) -> String {
    let mut parts = vec![
        format!("Owner: {owner}"),
        format!("Time: {} {}", session.exam_date, session.exam_time),
        format!("Duration: {} minutes", session.minutes),
        format!("Proctor(s): {}", session.proctor_label()),
        format!("Students: {}", session.num_of_students),
    ];
    if include_roster {
        parts.push(format!("Roster: {}", session.students.join(", ")));
    }
    parts.join("\n")
}
