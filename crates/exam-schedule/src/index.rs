//! Person indices: name → ordered session list.
//!
//! Two indices are built in a single pass over the schedule rows: one keyed
//! by student, one keyed by proctor. The proctor index is then merged per
//! slot (see [`crate::merge`]); the student index is stored as extracted.
//! Both are read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError, NAME_SAMPLE_LIMIT};
use crate::extract::{expand_row, Role};
use crate::merge::merge_proctor_sessions;
use crate::row::RawRow;
use crate::session::SessionRecord;

/// Sessions for every person of one kind, keyed by name.
///
/// Serializes as a plain JSON object `{ "<name>": [<session>, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonIndex {
    entries: BTreeMap<String, Vec<SessionRecord>>,
}

impl PersonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `session` to `name`'s list, creating the entry if needed.
    pub fn append(&mut self, name: impl Into<String>, session: SessionRecord) {
        self.entries.entry(name.into()).or_default().push(session);
    }

    pub fn get(&self, name: &str) -> Option<&[SessionRecord]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Like [`PersonIndex::get`], but a missing name is an error carrying a
    /// short sample of names that do exist.
    ///
    /// # Errors
    /// Returns `ScheduleError::NameNotFound` when `name` has no entry.
    pub fn lookup(&self, name: &str) -> Result<&[SessionRecord]> {
        self.get(name).ok_or_else(|| ScheduleError::NameNotFound {
            name: name.to_string(),
            sample: self
                .names()
                .take(NAME_SAMPLE_LIMIT)
                .map(str::to_string)
                .collect(),
            total: self.len(),
        })
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sorted names joined with `\n`, no trailing newline.
    pub fn name_list(&self) -> String {
        self.names().collect::<Vec<_>>().join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SessionRecord])> {
        self.entries
            .iter()
            .map(|(name, sessions)| (name.as_str(), sessions.as_slice()))
    }

    /// Replace every person's list with its slot-merged form.
    pub fn merge_slots(&mut self) {
        for sessions in self.entries.values_mut() {
            *sessions = merge_proctor_sessions(std::mem::take(sessions));
        }
    }

    /// Compact JSON object, as written to derived storage.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The student and proctor indices built from one schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleIndex {
    pub students: PersonIndex,
    pub proctors: PersonIndex,
}

impl ScheduleIndex {
    /// Extract every row, file the records, then merge the proctor index.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut index = Self::default();
        let mut row_count = 0usize;

        for row in rows {
            row_count += 1;
            for assignment in expand_row(&row) {
                index
                    .index_mut(assignment.role)
                    .append(assignment.name, assignment.session);
            }
        }

        index.proctors.merge_slots();

        debug!(
            rows = row_count,
            students = index.students.len(),
            proctors = index.proctors.len(),
            "built schedule index"
        );
        index
    }

    pub fn index(&self, role: Role) -> &PersonIndex {
        match role {
            Role::Student => &self.students,
            Role::Proctor => &self.proctors,
        }
    }

    fn index_mut(&mut self, role: Role) -> &mut PersonIndex {
        match role {
            Role::Student => &mut self.students,
            Role::Proctor => &mut self.proctors,
        }
    }

    /// # Errors
    /// Returns `ScheduleError::NameNotFound` when `name` is not in the
    /// index for `role`.
    pub fn lookup(&self, role: Role, name: &str) -> Result<&[SessionRecord]> {
        self.index(role).lookup(name)
    }
}
