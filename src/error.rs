//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while encoding participants, validating configuration,
/// or reading and writing roster files.
///
/// Every variant is detected before the annealing loop starts; the loop
/// itself never fails.
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("participant name '{name}' appears more than once")]
    DuplicateParticipant { name: String },

    #[error("participant '{participant}' has no value for attribute '{attribute}'")]
    MissingAttribute {
        participant: String,
        attribute: String,
    },

    #[error("value '{value}' is not in the category index of attribute '{attribute}'")]
    UnknownCategory { attribute: String, value: String },

    #[error("topic '{tag}' is not in the topic vocabulary")]
    UnknownTopic { tag: String },

    #[error("participant '{participant}' has malformed topic tags '{raw}': expected one or two tags")]
    MalformedTopics { participant: String, raw: String },

    #[error("{what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cannot seat {participants} participants at {tables} tables")]
    InvalidTableCount { tables: usize, participants: usize },

    #[error("table {table} is empty")]
    EmptyTable { table: usize },

    #[error("invalid score configuration: {0}")]
    InvalidScoreConfig(String),

    #[error("invalid anneal configuration: {0}")]
    InvalidAnnealConfig(String),

    #[error("annealing schedule with {steps} steps has no interior checkpoints; steps must be at least 2")]
    DegenerateSchedule { steps: usize },

    #[error("column '{column}' not found in roster header")]
    MissingColumn { column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SeatingError>;
