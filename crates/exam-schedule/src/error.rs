//! Error types for schedule parsing, lookup and calendar export.

use thiserror::Error;

/// Maximum number of valid names quoted back in a [`ScheduleError::NameNotFound`].
pub const NAME_SAMPLE_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unrecognized exam date: {0}")]
    MalformedDate(String),

    #[error("Unrecognized exam time: {0}")]
    MalformedTime(String),

    #[error("Unrecognized time token: {0}")]
    MalformedTimeToken(String),

    /// The requested person has no entry in the index. `sample` holds at most
    /// [`NAME_SAMPLE_LIMIT`] valid names; `total` is the size of the index.
    #[error("name not found: {name} (first few available names: {})", format_sample(.sample, .total))]
    NameNotFound {
        name: String,
        sample: Vec<String>,
        total: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_sample(sample: &[String], total: &usize) -> String {
    let mut out = sample.join(", ");
    if *total > sample.len() {
        out.push_str(", ...");
    }
    out
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
