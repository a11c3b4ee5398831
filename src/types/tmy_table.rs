//! Contains the normalized [`TmyTable`] and the hourly record it is built from.

use crate::interpolation::daily::interpolate_climate;
use crate::interpolation::error::InterpolationError;
use crate::tmy_data::error::TmyDataError;
use crate::tmy_data::normalizer::normalize_response;
use crate::tmy_data::response::PvgisTmyResponse;
use crate::types::climate_day_frame::ClimateDayFrame;
use crate::types::interpolation_method::InterpolationMethod;
use crate::types::keys::{DayKey, TmyKey, HOURS_PER_TMY};
use crate::types::site::SiteTimeZone;
use crate::types::tmy_variable::TmyVariable;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One hour of TMY data, addressed by its local (month, day, hour) key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmyHour {
    pub key: TmyKey,
    pub air_temperature: f64,
    pub relative_humidity: f64,
    pub global_horizontal: f64,
    pub beam_normal: f64,
    pub diffuse_horizontal: f64,
    pub infrared_horizontal: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub surface_pressure: f64,
}

impl TmyHour {
    /// Builds an hour by evaluating `value` for every variable.
    pub fn from_fn(key: TmyKey, value: impl Fn(TmyVariable) -> f64) -> Self {
        Self {
            key,
            air_temperature: value(TmyVariable::AirTemperature),
            relative_humidity: value(TmyVariable::RelativeHumidity),
            global_horizontal: value(TmyVariable::GlobalHorizontal),
            beam_normal: value(TmyVariable::BeamNormal),
            diffuse_horizontal: value(TmyVariable::DiffuseHorizontal),
            infrared_horizontal: value(TmyVariable::InfraredHorizontal),
            wind_speed: value(TmyVariable::WindSpeed),
            wind_direction: value(TmyVariable::WindDirection),
            surface_pressure: value(TmyVariable::SurfacePressure),
        }
    }

    pub fn value(&self, variable: TmyVariable) -> f64 {
        match variable {
            TmyVariable::AirTemperature => self.air_temperature,
            TmyVariable::RelativeHumidity => self.relative_humidity,
            TmyVariable::GlobalHorizontal => self.global_horizontal,
            TmyVariable::BeamNormal => self.beam_normal,
            TmyVariable::DiffuseHorizontal => self.diffuse_horizontal,
            TmyVariable::InfraredHorizontal => self.infrared_horizontal,
            TmyVariable::WindSpeed => self.wind_speed,
            TmyVariable::WindDirection => self.wind_direction,
            TmyVariable::SurfacePressure => self.surface_pressure,
        }
    }
}

/// The historical year PVGIS picked a month of the TMY from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMonth {
    pub month: u32,
    pub year: i32,
}

/// A normalized Typical Meteorological Year.
///
/// Holds exactly 8760 rows, one for every (month, day, hour) of a non-leap year in local
/// time, sorted ascending. The rows live in a Polars `DataFrame` with the key columns
/// `month`, `day`, `hour` followed by one `f64` column per [`TmyVariable`], named by
/// [`TmyVariable::column_name`].
///
/// A table is immutable once built. Obtain one from [`crate::PvgisTmy::fetch_tmy`],
/// from a saved PVGIS response with [`TmyTable::from_pvgis_json`], or from hourly records
/// with [`TmyTable::from_hours`].
#[derive(Debug, Clone)]
pub struct TmyTable {
    frame: DataFrame,
    rows: HashMap<TmyKey, usize>,
    months_selected: Vec<SelectedMonth>,
}

impl TmyTable {
    /// Builds a table from hourly records, sorting them by key.
    ///
    /// # Errors
    ///
    /// Returns [`TmyDataError::RowCount`] unless exactly 8760 records are given,
    /// [`TmyDataError::InvalidKey`] for a key outside a non-leap calendar and
    /// [`TmyDataError::DuplicateKey`] if two records share a key.
    pub fn from_hours(mut hours: Vec<TmyHour>) -> Result<Self, TmyDataError> {
        if hours.len() != HOURS_PER_TMY {
            return Err(TmyDataError::RowCount {
                expected: HOURS_PER_TMY,
                found: hours.len(),
            });
        }
        hours.sort_by_key(|hour| hour.key);

        if let Some(hour) = hours.iter().find(|hour| !hour.key.is_valid()) {
            return Err(TmyDataError::InvalidKey(hour.key));
        }
        if let Some(pair) = hours.windows(2).find(|pair| pair[0].key == pair[1].key) {
            return Err(TmyDataError::DuplicateKey(pair[0].key));
        }

        let mut columns = vec![
            Column::new("month".into(), hours.iter().map(|h| h.key.month).collect::<Vec<u32>>()),
            Column::new("day".into(), hours.iter().map(|h| h.key.day).collect::<Vec<u32>>()),
            Column::new("hour".into(), hours.iter().map(|h| h.key.hour).collect::<Vec<u32>>()),
        ];
        for variable in TmyVariable::ALL {
            let values: Vec<f64> = hours.iter().map(|h| h.value(variable)).collect();
            columns.push(Column::new(variable.column_name().into(), values));
        }
        let frame = DataFrame::new(columns)?;

        let rows = hours
            .iter()
            .enumerate()
            .map(|(row, hour)| (hour.key, row))
            .collect();

        Ok(Self {
            frame,
            rows,
            months_selected: Vec::new(),
        })
    }

    /// Normalizes a PVGIS TMY JSON response (as returned with `outputformat=json`).
    ///
    /// # Errors
    ///
    /// Returns [`TmyDataError::ResponseDecode`] if `json` is not a PVGIS TMY response, or any
    /// of the normalization errors of [`TmyTable::from_hours`].
    pub fn from_pvgis_json(json: &str, timezone: SiteTimeZone) -> Result<Self, TmyDataError> {
        let response: PvgisTmyResponse = serde_json::from_str(json)
            .map_err(|e| TmyDataError::ResponseDecode("PVGIS JSON document".to_string(), e))?;
        normalize_response(response, timezone)
    }

    /// Reads a saved PVGIS TMY JSON response from disk and normalizes it.
    pub fn from_pvgis_json_file(path: &Path, timezone: SiteTimeZone) -> Result<Self, TmyDataError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| TmyDataError::FileRead(path.to_path_buf(), e))?;
        Self::from_pvgis_json(&json, timezone)
    }

    pub(crate) fn with_months_selected(mut self, months_selected: Vec<SelectedMonth>) -> Self {
        self.months_selected = months_selected;
        self
    }

    /// The underlying frame: `month`, `day`, `hour`, then one column per variable.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn contains_key(&self, key: TmyKey) -> bool {
        self.rows.contains_key(&key)
    }

    /// Which historical year each month was drawn from, when the source reported it.
    pub fn months_selected(&self) -> &[SelectedMonth] {
        &self.months_selected
    }

    pub(crate) fn row(&self, key: TmyKey) -> Option<usize> {
        self.rows.get(&key).copied()
    }

    /// The values of one variable, in row order.
    pub fn column(&self, variable: TmyVariable) -> PolarsResult<&Float64Chunked> {
        self.frame.column(variable.column_name())?.f64()
    }

    /// The value of `variable` at `key`, or `None` if the key is not in the table.
    pub fn value(&self, key: TmyKey, variable: TmyVariable) -> Option<f64> {
        let row = self.row(key)?;
        self.column(variable).ok()?.get(row)
    }

    /// The full record at `key`.
    pub fn hour(&self, key: TmyKey) -> Option<TmyHour> {
        let row = self.row(key)?;
        let value = |variable: TmyVariable| self.column(variable).ok().and_then(|c| c.get(row));
        if TmyVariable::ALL.into_iter().any(|variable| value(variable).is_none()) {
            return None;
        }
        Some(TmyHour::from_fn(key, |variable| value(variable).unwrap_or(f64::NAN)))
    }

    /// Interpolates this table onto the target timestamps of each day.
    ///
    /// See [`interpolate_climate`].
    pub fn interpolate(
        &self,
        target_groups: &BTreeMap<DayKey, Vec<NaiveDateTime>>,
        method: InterpolationMethod,
    ) -> Result<BTreeMap<DayKey, ClimateDayFrame>, InterpolationError> {
        interpolate_climate(target_groups, self, method)
    }
}
