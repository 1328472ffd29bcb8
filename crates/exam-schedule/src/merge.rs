//! Coalesce a proctor's sessions that share a date/time slot.
//!
//! One proctor often supervises several class sections sitting in the same
//! room at the same time. Those arrive as separate rows, and would otherwise
//! become duplicate calendar events. Sessions are grouped on the exact
//! `(exam_date, exam_time)` strings with no normalization, so `800-1000` and
//! `08:00-10:00` stay apart.

use std::collections::HashMap;

use tracing::debug;

use crate::fields::dedup_preserving_order;
use crate::session::SessionRecord;

/// Merge sessions sharing a slot, keeping first-seen slot order.
///
/// The first record of each slot is the accumulator; later records for the
/// same slot fold into it:
///
/// - `students` is concatenated as-is. Students listed under both records
///   appear twice.
/// - `subject`, `class_num` and `num_of_students` are split on `,`, unioned
///   in first-occurrence order, and rejoined with `,`.
/// - Every other field keeps the accumulator's value.
pub fn merge_proctor_sessions(sessions: Vec<SessionRecord>) -> Vec<SessionRecord> {
    let incoming = sessions.len();
    let mut merged: Vec<SessionRecord> = Vec::new();
    let mut slots: HashMap<(String, String), usize> = HashMap::new();

    for session in sessions {
        let key = (session.exam_date.clone(), session.exam_time.clone());
        match slots.get(&key) {
            Some(&idx) => absorb(&mut merged[idx], session),
            None => {
                slots.insert(key, merged.len());
                merged.push(session);
            }
        }
    }

    debug!(incoming, merged = merged.len(), "merged proctor sessions");
    merged
}

fn absorb(acc: &mut SessionRecord, other: SessionRecord) {
    acc.students.extend(other.students);
    acc.subject = union_comma_separated(&acc.subject, &other.subject);
    acc.class_num = union_comma_separated(&acc.class_num, &other.class_num);
    acc.num_of_students = union_comma_separated(&acc.num_of_students, &other.num_of_students);
}

/// Union two comma-joined lists, first occurrence wins: `"1,2"` ∪ `"2,3"` is `"1,2,3"`.
///
/// Items are compared verbatim; `"1, 2"` splits into `"1"` and `" 2"`.
pub fn union_comma_separated(left: &str, right: &str) -> String {
    dedup_preserving_order(left.split(',').chain(right.split(',')).map(str::to_string)).join(",")
}
