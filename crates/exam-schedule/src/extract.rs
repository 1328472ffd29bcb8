//! Session extraction: fan one schedule row out into per-person records.
//!
//! A row yields one record for every distinct proctor and one for every
//! student. All records from a row are identical; only the person they are
//! filed under differs. Missing metadata never fails a row: it is replaced
//! by the matching [`sentinel`](crate::session::sentinel) text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fields::{dedup_preserving_order, split_names};
use crate::row::RawRow;
use crate::session::{columns, sentinel, SessionRecord};

/// Which person index a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Proctor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Proctor => "proctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "proctor" => Ok(Role::Proctor),
            other => Err(format!("unknown role '{other}', expected student or proctor")),
        }
    }
}

/// One (index, person, record) triple produced by [`expand_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub role: Role,
    pub name: String,
    pub session: SessionRecord,
}

/// Non-empty student cells in column order. Every column outside the fixed
/// metadata set counts as a student column.
pub fn roster(row: &RawRow) -> Vec<String> {
    row.cells()
        .filter(|(column, _)| !columns::is_fixed(column))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everyone named in the two proctor cells, split, trimmed and deduplicated
/// with first-seen order kept.
pub fn distinct_proctors(row: &RawRow) -> Vec<String> {
    let first = row.get(columns::PROCTOR1).map(split_names).unwrap_or_default();
    let second = row.get(columns::PROCTOR2).map(split_names).unwrap_or_default();
    dedup_preserving_order(first.into_iter().chain(second))
}

/// Build the record every person in `row` will receive.
pub fn session_from_row(row: &RawRow) -> SessionRecord {
    SessionRecord {
        exam_date: field_or_sentinel(row, columns::EXAM_DATE, sentinel::DATE),
        exam_time: field_or_sentinel(row, columns::EXAM_TIME, sentinel::TIME),
        subject: field_or_sentinel(row, columns::SUBJECT, sentinel::SUBJECT),
        grade: field_or_sentinel(row, columns::GRADE, sentinel::GRADE),
        class_num: field_or_sentinel(row, columns::CLASS_NUM, sentinel::CLASS_NUM),
        minutes: field_or_sentinel(row, columns::MINUTES, sentinel::MINUTES),
        location: field_or_sentinel(row, columns::LOCATION, sentinel::LOCATION),
        proctor1: field_or_sentinel(row, columns::PROCTOR1, sentinel::PROCTOR),
        proctor2: non_empty(row, columns::PROCTOR2).map(str::to_string),
        num_of_students: field_or_sentinel(
            row,
            columns::NUM_OF_STUDENTS,
            sentinel::NUM_OF_STUDENTS,
        ),
        students: roster(row),
    }
}

/// Expand one row into the records to file under each proctor and student.
///
/// Proctor assignments come first, then students, each in source order.
/// Pure: inserting the results into an index is the caller's job.
pub fn expand_row(row: &RawRow) -> Vec<Assignment> {
    let session = session_from_row(row);
    let proctors = distinct_proctors(row);

    let proctor_assignments = proctors.into_iter().map(|name| Assignment {
        role: Role::Proctor,
        name,
        session: session.clone(),
    });
    let student_assignments = session.students.iter().map(|name| Assignment {
        role: Role::Student,
        name: name.clone(),
        session: session.clone(),
    });

    proctor_assignments.chain(student_assignments).collect()
}

fn non_empty<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).filter(|value| !value.trim().is_empty())
}

fn field_or_sentinel(row: &RawRow, column: &str, placeholder: &str) -> String {
    match non_empty(row, column) {
        Some(value) => value.to_string(),
        None => {
            warn!(column, placeholder, "missing schedule field, substituting placeholder");
            placeholder.to_string()
        }
    }
}
