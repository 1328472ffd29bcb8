//! Field parsing: free-form date, time-range and name-list cells.
//!
//! Exam exports are hand-edited, so the grammar is loose: dates use `.`, `/`
//! or `-` between components (`2024.12.20`, `2024/12/20`), time ranges are
//! either compact digit runs (`800-1000`) or clock notation (`08:00-10:00`),
//! and name cells separate people with the full-width `、` and stray newlines.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Result, ScheduleError};

/// Separator placed between names inside a single proctor cell.
pub const NAME_SEPARATOR: char = '、';

/// Start and end of one exam slot on its (separately parsed) date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parse an exam date such as `2024.12.20`, `2024/1/5` or `2024-01-05`.
///
/// The first three numeric components are read as year, month and day;
/// anything after them is ignored.
///
/// # Errors
/// Returns `ScheduleError::MalformedDate` when fewer than three components
/// remain after splitting, when a component is not a number, or when the
/// components do not name a real calendar day.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let malformed = || ScheduleError::MalformedDate(text.to_string());

    let parts: Vec<&str> = text
        .trim()
        .split(['.', '/', '-'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() < 3 {
        return Err(malformed());
    }

    let year: i32 = parts[0].parse().map_err(|_| malformed())?;
    let month: u32 = parts[1].parse().map_err(|_| malformed())?;
    let day: u32 = parts[2].parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Parse an exam time range such as `800-1000` or `08:00-10:00`.
///
/// # Errors
/// Returns `ScheduleError::MalformedTime` unless the text splits on `-` into
/// exactly two non-empty tokens, and `ScheduleError::MalformedTimeToken` when
/// a token is neither `HH:MM` nor a 3-4 digit run naming a valid clock time.
pub fn parse_time_range(text: &str) -> Result<TimeRange> {
    let tokens: Vec<&str> = text.trim().split('-').map(str::trim).collect();

    let [start, end] = tokens.as_slice() else {
        return Err(ScheduleError::MalformedTime(text.to_string()));
    };
    if start.is_empty() || end.is_empty() {
        return Err(ScheduleError::MalformedTime(text.to_string()));
    }

    Ok(TimeRange {
        start: parse_time_token(start)?,
        end: parse_time_token(end)?,
    })
}

/// Parse one side of a time range: `H:MM`/`HH:MM`, or `HMM`/`HHMM` digits.
fn parse_time_token(token: &str) -> Result<NaiveTime> {
    let malformed = || ScheduleError::MalformedTimeToken(token.to_string());

    let (hour, minute) = if let Some((hh, mm)) = token.split_once(':') {
        let hour: u32 = hh.trim().parse().map_err(|_| malformed())?;
        let minute: u32 = mm.trim().parse().map_err(|_| malformed())?;
        (hour, minute)
    } else {
        let digits: String = token.chars().filter(char::is_ascii_digit).collect();
        if !(3..=4).contains(&digits.len()) {
            return Err(malformed());
        }
        let (hh, mm) = digits.split_at(digits.len() - 2);
        let hour: u32 = hh.parse().map_err(|_| malformed())?;
        let minute: u32 = mm.parse().map_err(|_| malformed())?;
        (hour, minute)
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Split a cell naming one or more people into trimmed, non-empty names.
///
/// Both `、` and line breaks act as delimiters.
pub fn split_names(text: &str) -> Vec<String> {
    text.split(|c: char| c == NAME_SEPARATOR || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop repeated values, keeping the first occurrence of each in place.
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
