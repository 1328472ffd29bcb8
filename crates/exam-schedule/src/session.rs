//! The session record shared by both person indices.

use serde::{Deserialize, Serialize};

/// Column names of the fixed metadata fields in the schedule export.
/// Every other column is a student column.
pub mod columns {
    pub const EXAM_DATE: &str = "examDate";
    pub const EXAM_TIME: &str = "examTime";
    pub const SUBJECT: &str = "subject";
    pub const GRADE: &str = "grade";
    pub const CLASS_NUM: &str = "classNum";
    pub const MINUTES: &str = "minutes";
    pub const LOCATION: &str = "location";
    pub const PROCTOR1: &str = "proctor1";
    pub const PROCTOR2: &str = "proctor2";
    pub const NUM_OF_STUDENTS: &str = "numOfStudents";

    pub const FIXED: [&str; 10] = [
        EXAM_DATE,
        EXAM_TIME,
        SUBJECT,
        GRADE,
        CLASS_NUM,
        MINUTES,
        LOCATION,
        PROCTOR1,
        PROCTOR2,
        NUM_OF_STUDENTS,
    ];

    /// Whether `column` is one of the fixed metadata columns.
    pub fn is_fixed(column: &str) -> bool {
        FIXED.contains(&column)
    }
}

/// Placeholder text stored in place of a missing metadata cell.
///
/// These are ordinary strings as far as every consumer is concerned; they
/// show up verbatim in JSON output and calendar descriptions.
pub mod sentinel {
    pub const DATE: &str = "INVALID DATE";
    pub const TIME: &str = "INVALID TIME";
    pub const SUBJECT: &str = "INVALID SUBJECT";
    pub const GRADE: &str = "INVALID GRADE";
    pub const CLASS_NUM: &str = "INVALID CLASS NUMBER";
    pub const MINUTES: &str = "INVALID MINUTES";
    pub const LOCATION: &str = "INVALID LOCATION";
    pub const PROCTOR: &str = "INVALID PROCTOR";
    pub const NUM_OF_STUDENTS: &str = "INVALID NUMBER OF STUDENTS";
}

/// One exam slot as seen by one person (student or proctor).
///
/// Field names serialize in camelCase to match the stored JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub exam_date: String,
    pub exam_time: String,
    pub subject: String,
    pub grade: String,
    pub class_num: String,
    pub minutes: String,
    pub location: String,
    pub proctor1: String,
    /// The only field that is genuinely optional; serialized as `null`.
    pub proctor2: Option<String>,
    pub num_of_students: String,
    pub students: Vec<String>,
}

impl SessionRecord {
    /// Proctor cells joined for display, e.g. `A / B`.
    pub fn proctor_label(&self) -> String {
        match self.proctor2.as_deref().filter(|p| !p.is_empty()) {
            Some(second) => format!("{} / {}", self.proctor1, second),
            None => self.proctor1.clone(),
        }
    }
}
