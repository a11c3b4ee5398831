//! Contains the `ClimateDayFrame` produced for each target day by the interpolator.

use crate::types::tmy_variable::TmyVariable;
use chrono::NaiveDateTime;
use polars::prelude::{DataFrame, Float64Chunked, PolarsResult};

/// Name of the fractional time-of-day column.
pub const HMS_FLOAT_COLUMN: &str = "hms_float";

/// Climate variables of one calendar day, interpolated at the caller's timestamps.
///
/// `timestamps` is the row index: row `i` of `frame` holds the values at `timestamps[i]`.
/// The frame has an `hms_float` column (time of day in fractional hours) followed by one
/// `f64` column per [`TmyVariable`].
#[derive(Debug, Clone)]
pub struct ClimateDayFrame {
    /// The target timestamps, in the order they were supplied.
    pub timestamps: Vec<NaiveDateTime>,
    /// The interpolated values.
    pub frame: DataFrame,
}

impl ClimateDayFrame {
    pub(crate) fn new(timestamps: Vec<NaiveDateTime>, frame: DataFrame) -> Self {
        Self { timestamps, frame }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn hms_float(&self) -> PolarsResult<&Float64Chunked> {
        self.frame.column(HMS_FLOAT_COLUMN)?.f64()
    }

    pub fn column(&self, variable: TmyVariable) -> PolarsResult<&Float64Chunked> {
        self.frame.column(variable.column_name())?.f64()
    }

    /// The interpolated value of `variable` at row `row`.
    pub fn value(&self, row: usize, variable: TmyVariable) -> Option<f64> {
        self.column(variable).ok()?.get(row)
    }
}
