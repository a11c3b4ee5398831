//! Relabels a UTC-indexed PVGIS response into a locally keyed [`TmyTable`].

use crate::tmy_data::error::TmyDataError;
use crate::tmy_data::response::{PvgisHourlyRecord, PvgisTmyResponse};
use crate::types::keys::{TmyKey, HOURS_PER_TMY, REFERENCE_YEAR};
use crate::types::site::SiteTimeZone;
use crate::types::tmy_table::{SelectedMonth, TmyHour, TmyTable};
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use log::debug;

const PVGIS_TIME_FORMAT: &str = "%Y%m%d:%H%M";

pub(crate) fn parse_utc(value: &str) -> Result<NaiveDateTime, TmyDataError> {
    NaiveDateTime::parse_from_str(value, PVGIS_TIME_FORMAT).map_err(|source| {
        TmyDataError::TimestampParse {
            value: value.to_string(),
            source,
        }
    })
}

/// Maps a UTC timestamp to the local (month, day, hour) key.
///
/// The timestamp is moved onto a non-leap reference year first, so the shift by `offset`
/// permutes the 8760 hourly slots: rows pushed past December 31 wrap to January 1.
fn local_key(utc: NaiveDateTime, offset: TimeDelta, raw: &str) -> Result<TmyKey, TmyDataError> {
    let rebased = utc
        .with_year(REFERENCE_YEAR)
        .ok_or_else(|| TmyDataError::LeapDayRow(raw.to_string()))?;
    let local = rebased + offset;
    Ok(TmyKey::new(local.month(), local.day(), local.hour()))
}

fn to_hour(record: &PvgisHourlyRecord, key: TmyKey) -> TmyHour {
    TmyHour {
        key,
        air_temperature: record.air_temperature,
        relative_humidity: record.relative_humidity,
        global_horizontal: record.global_horizontal,
        beam_normal: record.beam_normal,
        diffuse_horizontal: record.diffuse_horizontal,
        infrared_horizontal: record.infrared_horizontal,
        wind_speed: record.wind_speed,
        wind_direction: record.wind_direction,
        surface_pressure: record.surface_pressure,
    }
}

/// Converts a PVGIS response to a table keyed by local (month, day, hour).
pub(crate) fn normalize_response(
    response: PvgisTmyResponse,
    timezone: SiteTimeZone,
) -> Result<TmyTable, TmyDataError> {
    let records = response.outputs.tmy_hourly;
    let first = match records.first() {
        Some(first) if records.len() == HOURS_PER_TMY => first,
        _ => {
            return Err(TmyDataError::RowCount {
                expected: HOURS_PER_TMY,
                found: records.len(),
            })
        }
    };

    let offset = timezone.standard_offset(parse_utc(&first.time_utc)?);
    let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    debug!(
        "Relabelling {} TMY rows from UTC to {} (offset {})",
        records.len(),
        timezone,
        offset
    );

    let hours = records
        .iter()
        .map(|record| {
            let utc = parse_utc(&record.time_utc)?;
            let key = local_key(utc, shift, &record.time_utc)?;
            Ok(to_hour(record, key))
        })
        .collect::<Result<Vec<TmyHour>, TmyDataError>>()?;

    let months_selected = response
        .outputs
        .months_selected
        .iter()
        .map(|selected| SelectedMonth {
            month: selected.month,
            year: selected.year,
        })
        .collect();

    Ok(TmyTable::from_hours(hours)?.with_months_selected(months_selected))
}
