use crate::types::keys::DayKey;
use chrono::NaiveDateTime;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Target day {0} is not a valid calendar date")]
    InvalidDayKey(DayKey),

    #[error("Target timestamp {timestamp} does not fall on its group day {day}")]
    MalformedTargetTimestamp {
        day: DayKey,
        timestamp: NaiveDateTime,
    },

    #[error("TMY has no complete 24-hour profile for month {month} day {day} (needed by {target})")]
    MissingDayProfile { target: DayKey, month: u32, day: u32 },

    #[error("No closing node (hour 0 of the next day) could be resolved for {target}")]
    MissingClosingNode { target: DayKey },

    #[error("Interpolation needs at least {required} nodes for degree {degree}, got {found}")]
    TooFewNodes {
        degree: usize,
        required: usize,
        found: usize,
    },

    #[error("Expected one value per node ({expected}), got {found}")]
    NodeValueMismatch { expected: usize, found: usize },

    #[error("Spline collocation matrix is singular")]
    SingularCollocation,

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
