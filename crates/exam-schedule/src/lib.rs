//! # exam-schedule
//!
//! Turns a tabular exam-schedule export (one row per exam session) into
//! per-student and per-proctor session lists, and serializes any person's
//! sessions into an RFC 5545 calendar document.
//!
//! ## Quick start
//!
//! ```rust
//! use exam_schedule::{serialize_calendar, ExportOptions, RawRow, Role, ScheduleIndex};
//!
//! let row: RawRow = [
//!     ("examDate", "2024.12.20"),
//!     ("examTime", "800-1000"),
//!     ("subject", "Math"),
//!     ("proctor1", "Teacher A"),
//!     ("s1", "Alice"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let index = ScheduleIndex::build([row]);
//! let sessions = index.lookup(Role::Student, "Alice").unwrap();
//! let ics = serialize_calendar("Alice", sessions, &ExportOptions::new("exam: Alice")).unwrap();
//! assert!(ics.contains("DTSTART;TZID=Asia/Shanghai:20241220T080000"));
//! ```
//!
//! ## Modules
//!
//! - [`fields`]: date, time-range and multi-name field parsing
//! - [`row`]: one raw spreadsheet row, column order preserved
//! - [`session`]: the session record and its sentinel values
//! - [`extract`]: row → per-person session records (fan-out)
//! - [`merge`]: coalesce a proctor's sessions sharing a date/time slot
//! - [`index`]: person → sessions indices, lookup and JSON storage
//! - [`ingest`]: CSV tables in and out
//! - [`backfill`]: fill-down of blank cells from earlier rows
//! - [`ics`]: calendar document serialization
//! - [`display`]: short date/time labels for listings
//! - [`error`]: Error types

pub mod backfill;
pub mod display;
pub mod error;
pub mod extract;
pub mod fields;
pub mod ics;
pub mod index;
pub mod ingest;
pub mod merge;
pub mod row;
pub mod session;

pub use error::ScheduleError;
pub use extract::{expand_row, Assignment, Role};
pub use ics::{serialize_calendar, serialize_calendar_at, ExportOptions};
pub use index::{PersonIndex, ScheduleIndex};
pub use ingest::Table;
pub use merge::merge_proctor_sessions;
pub use row::RawRow;
pub use session::SessionRecord;
