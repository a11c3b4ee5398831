//! Evaluates a [`TmyTable`] at arbitrary timestamps, one calendar day at a time.
//!
//! Each day is interpolated over 25 nodes at hours 0..=24: the 24 hourly rows of the day
//! plus hour 0 of the following day, so that timestamps after 23:00 are bracketed.

use crate::interpolation::error::InterpolationError;
use crate::interpolation::spline::InterpolatingSpline;
use crate::types::climate_day_frame::{ClimateDayFrame, HMS_FLOAT_COLUMN};
use crate::types::interpolation_method::InterpolationMethod;
use crate::types::keys::{DayKey, TmyKey};
use crate::types::tmy_table::TmyTable;
use crate::types::tmy_variable::TmyVariable;
use chrono::{NaiveDateTime, Timelike};
use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Interpolation nodes per day: hours 0 through 24.
pub const NODES_PER_DAY: usize = 25;

/// Time of day in fractional hours: `hour + minute / 60 + second / 3600`.
pub fn fractional_hour(timestamp: &NaiveDateTime) -> f64 {
    f64::from(timestamp.hour())
        + f64::from(timestamp.minute()) / 60.0
        + f64::from(timestamp.second()) / 3600.0
}

/// The TMY (month, day) whose hourly profile serves `day`.
///
/// A TMY has no February 29; leap days reuse February 28.
pub fn lookup_day(day: DayKey) -> (u32, u32) {
    if day.is_leap_day() {
        (2, 28)
    } else {
        (day.month, day.day)
    }
}

/// The key of the node at hour 24 of (month, day): hour 0 of the next day if the table has
/// it, else hour 0 of the first day of the next month, else hour 0 of January 1.
pub fn closing_node_key(
    month: u32,
    day: u32,
    contains: impl Fn(TmyKey) -> bool,
) -> Option<TmyKey> {
    [
        TmyKey::new(month, day + 1, 0),
        TmyKey::new(month + 1, 1, 0),
        TmyKey::new(1, 1, 0),
    ]
    .into_iter()
    .find(|key| contains(*key))
}

/// Interpolates the TMY onto the target timestamps of every day in `target_groups`.
///
/// Returns one [`ClimateDayFrame`] per group, under the same key, with one row per
/// timestamp in the order given. Every variable is interpolated independently with
/// `method`; at whole hours the result equals the TMY row exactly.
///
/// # Errors
///
/// Fails on the first group that cannot be interpolated; no partial result is returned.
///
/// * [`InterpolationError::InvalidDayKey`] if a key is not a calendar date.
/// * [`InterpolationError::MalformedTargetTimestamp`] if a timestamp lies on another day.
/// * [`InterpolationError::MissingDayProfile`] if the TMY lacks an hour of the day.
/// * [`InterpolationError::MissingClosingNode`] if no closing node can be resolved.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use pvgis_tmy::{group_by_day, interpolate_climate, DayKey, InterpolationMethod, TmyTable, TmyVariable};
///
/// # fn run(tmy: &TmyTable) -> Result<(), Box<dyn std::error::Error>> {
/// let day = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
/// let stamps = (0..=144).map(|i| day.and_hms_opt(6, 0, 0).unwrap() + chrono::Duration::minutes(5 * i));
/// let climate = interpolate_climate(&group_by_day(stamps), tmy, InterpolationMethod::Cubic)?;
///
/// let frame = &climate[&DayKey::from(day)];
/// println!("{}", frame.frame);
/// println!("T2m at 12:00: {:?}", frame.value(72, TmyVariable::AirTemperature));
/// # Ok(())
/// # }
/// ```
pub fn interpolate_climate(
    target_groups: &BTreeMap<DayKey, Vec<NaiveDateTime>>,
    tmy: &TmyTable,
    method: InterpolationMethod,
) -> Result<BTreeMap<DayKey, ClimateDayFrame>, InterpolationError> {
    let nodes: Vec<f64> = (0..NODES_PER_DAY).map(|hour| hour as f64).collect();
    let spline = InterpolatingSpline::new(&nodes, method)?;
    let columns = TmyVariable::ALL
        .into_iter()
        .map(|variable| tmy.column(variable))
        .collect::<PolarsResult<Vec<&Float64Chunked>>>()?;

    debug!(
        "Interpolating {} day groups with the {} method",
        target_groups.len(),
        method
    );

    target_groups
        .iter()
        .map(|(day, timestamps)| {
            let frame = interpolate_day(*day, timestamps, tmy, &columns, &spline)?;
            Ok::<_, InterpolationError>((*day, frame))
        })
        .collect()
}

fn node_rows(day: DayKey, tmy: &TmyTable) -> Result<Vec<usize>, InterpolationError> {
    let (month, lookup) = lookup_day(day);
    let mut rows = (0..24)
        .map(|hour| {
            tmy.row(TmyKey::new(month, lookup, hour))
                .ok_or(InterpolationError::MissingDayProfile {
                    target: day,
                    month,
                    day: lookup,
                })
        })
        .collect::<Result<Vec<usize>, InterpolationError>>()?;

    let closing = closing_node_key(month, lookup, |key| tmy.contains_key(key))
        .and_then(|key| tmy.row(key))
        .ok_or(InterpolationError::MissingClosingNode { target: day })?;
    rows.push(closing);
    Ok(rows)
}

fn interpolate_day(
    day: DayKey,
    timestamps: &[NaiveDateTime],
    tmy: &TmyTable,
    columns: &[&Float64Chunked],
    spline: &InterpolatingSpline,
) -> Result<ClimateDayFrame, InterpolationError> {
    let date = day.date().ok_or(InterpolationError::InvalidDayKey(day))?;
    if let Some(stray) = timestamps.iter().find(|timestamp| timestamp.date() != date) {
        return Err(InterpolationError::MalformedTargetTimestamp {
            day,
            timestamp: *stray,
        });
    }

    let hms_float: Vec<f64> = timestamps.iter().map(fractional_hour).collect();
    let rows = node_rows(day, tmy)?;
    let evaluator = spline.at(&hms_float);

    let mut frame_columns = Vec::with_capacity(1 + columns.len());
    frame_columns.push(Column::new(HMS_FLOAT_COLUMN.into(), hms_float));
    for (variable, column) in TmyVariable::ALL.into_iter().zip(columns) {
        let values: Vec<f64> = rows
            .iter()
            .map(|&row| column.get(row).unwrap_or(f64::NAN))
            .collect();
        let interpolated = evaluator.evaluate(&values)?;
        frame_columns.push(Column::new(variable.column_name().into(), interpolated));
    }

    Ok(ClimateDayFrame::new(
        timestamps.to_vec(),
        DataFrame::new(frame_columns)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{synthetic_table, synthetic_value, table_from_fn};
    use crate::types::keys::group_by_day;
    use chrono::{Duration, NaiveDate};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn single_day(stamps: Vec<NaiveDateTime>) -> BTreeMap<DayKey, Vec<NaiveDateTime>> {
        let mut groups = BTreeMap::new();
        groups.insert(DayKey::from(stamps[0].date()), stamps);
        groups
    }

    fn hourly(year: i32, month: u32, day: u32) -> Vec<NaiveDateTime> {
        (0..24).map(|hour| at(year, month, day, hour, 0, 0)).collect()
    }

    fn assert_close(left: f64, right: f64) {
        assert!(
            (left - right).abs() < 1e-9,
            "left={}, right={}, diff={}",
            left,
            right,
            (left - right).abs()
        );
    }

    #[test]
    fn test_fractional_hour() {
        assert_eq!(fractional_hour(&at(2023, 1, 1, 0, 0, 0)), 0.0);
        assert_eq!(fractional_hour(&at(2023, 1, 1, 10, 30, 0)), 10.5);
        assert_close(fractional_hour(&at(2023, 1, 1, 23, 59, 59)), 23.0 + 59.0 / 60.0 + 59.0 / 3600.0);
    }

    #[test]
    fn test_lookup_day_maps_leap_day() {
        assert_eq!(lookup_day(DayKey::new(2024, 2, 29)), (2, 28));
        assert_eq!(lookup_day(DayKey::new(2024, 2, 28)), (2, 28));
        assert_eq!(lookup_day(DayKey::new(2023, 12, 31)), (12, 31));
    }

    #[test]
    fn test_closing_node_fallback_chain() {
        let everything = |key: TmyKey| key.is_valid();
        assert_eq!(closing_node_key(6, 15, everything), Some(TmyKey::new(6, 16, 0)));
        assert_eq!(closing_node_key(4, 30, everything), Some(TmyKey::new(5, 1, 0)));
        assert_eq!(closing_node_key(2, 28, everything), Some(TmyKey::new(3, 1, 0)));
        assert_eq!(closing_node_key(12, 31, everything), Some(TmyKey::new(1, 1, 0)));

        let only_new_year = |key: TmyKey| key == TmyKey::new(1, 1, 0);
        assert_eq!(closing_node_key(6, 15, only_new_year), Some(TmyKey::new(1, 1, 0)));
        assert_eq!(closing_node_key(6, 15, |_| false), None);
    }

    #[test]
    fn test_linear_half_hour_example() -> Result<(), InterpolationError> {
        let tmy = table_from_fn(|key| 10.0 + f64::from(key.hour));
        assert_eq!(tmy.value(TmyKey::new(6, 15, 10), TmyVariable::AirTemperature), Some(20.0));
        assert_eq!(tmy.value(TmyKey::new(6, 15, 11), TmyVariable::AirTemperature), Some(21.0));

        let groups = single_day(vec![at(2023, 6, 15, 10, 30, 0)]);
        let climate = interpolate_climate(&groups, &tmy, InterpolationMethod::Linear)?;
        let day = &climate[&DayKey::new(2023, 6, 15)];
        assert_close(day.value(0, TmyVariable::AirTemperature).unwrap(), 20.5);
        assert_eq!(day.hms_float()?.get(0), Some(10.5));
        Ok(())
    }

    #[test]
    fn test_five_minute_grid_shape() -> Result<(), InterpolationError> {
        let start = at(2023, 3, 21, 6, 0, 0);
        let stamps: Vec<NaiveDateTime> = (0..)
            .map(|i| start + Duration::minutes(5 * i))
            .take_while(|stamp| *stamp <= at(2023, 3, 21, 18, 0, 0))
            .collect();
        let groups = single_day(stamps.clone());

        let climate = synthetic_table().interpolate(&groups, InterpolationMethod::Cubic)?;
        assert_eq!(climate.len(), 1);
        let day = &climate[&DayKey::new(2023, 3, 21)];
        assert_eq!(day.len(), 145);
        assert_eq!(day.timestamps, stamps);
        assert_eq!(day.frame.shape(), (145, 1 + TmyVariable::ALL.len()));
        let names: Vec<&str> = day
            .frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(
            names,
            ["hms_float", "T2m", "RH", "G(h)", "Gb(n)", "Gd(h)", "IR(h)", "WS10m", "WD10m", "SP"]
        );
        Ok(())
    }

    #[test]
    fn test_whole_hours_reproduce_tmy_for_every_method() -> Result<(), InterpolationError> {
        let tmy = synthetic_table();
        let groups = single_day(hourly(2023, 8, 9));
        for method in InterpolationMethod::ALL {
            let climate = interpolate_climate(&groups, &tmy, method)?;
            let day = &climate[&DayKey::new(2023, 8, 9)];
            for hour in 0..24 {
                for variable in TmyVariable::ALL {
                    assert_eq!(
                        day.value(hour as usize, variable),
                        Some(synthetic_value(TmyKey::new(8, 9, hour), variable)),
                        "{} {} at hour {}",
                        method,
                        variable,
                        hour
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_last_second_approaches_closing_node() -> Result<(), InterpolationError> {
        let tmy = synthetic_table();
        let groups = single_day(vec![at(2023, 5, 10, 0, 0, 0), at(2023, 5, 10, 23, 59, 59)]);
        let climate = interpolate_climate(&groups, &tmy, InterpolationMethod::Linear)?;
        let day = &climate[&DayKey::new(2023, 5, 10)];

        let variable = TmyVariable::WindSpeed;
        let first = synthetic_value(TmyKey::new(5, 10, 0), variable);
        let last_hour = synthetic_value(TmyKey::new(5, 10, 23), variable);
        let closing = synthetic_value(TmyKey::new(5, 11, 0), variable);

        assert_eq!(day.value(0, variable), Some(first));
        let near_midnight = day.value(1, variable).unwrap();
        assert!(near_midnight > last_hour && near_midnight < closing);
        assert!(closing - near_midnight < 1e-3);
        Ok(())
    }

    #[test]
    fn test_leap_day_matches_february_28() -> Result<(), InterpolationError> {
        let tmy = synthetic_table();
        let times = [(0, 0, 0), (7, 15, 0), (12, 0, 0), (23, 45, 30)];
        let leap = single_day(times.iter().map(|&(h, m, s)| at(2024, 2, 29, h, m, s)).collect());
        let regular = single_day(times.iter().map(|&(h, m, s)| at(2024, 2, 28, h, m, s)).collect());

        for method in InterpolationMethod::ALL {
            let leap_day = interpolate_climate(&leap, &tmy, method)?;
            let feb_28 = interpolate_climate(&regular, &tmy, method)?;
            let leap_frame = &leap_day[&DayKey::new(2024, 2, 29)].frame;
            let feb_28_frame = &feb_28[&DayKey::new(2024, 2, 28)].frame;
            assert!(leap_frame.equals(feb_28_frame), "{} differs", method);
        }
        Ok(())
    }

    #[test]
    fn test_december_31_wraps_to_january_1() -> Result<(), InterpolationError> {
        let tmy = synthetic_table();
        let groups = single_day(vec![at(2022, 12, 31, 23, 30, 0)]);
        let climate = interpolate_climate(&groups, &tmy, InterpolationMethod::Linear)?;
        let day = &climate[&DayKey::new(2022, 12, 31)];

        let variable = TmyVariable::AirTemperature;
        let expected = (synthetic_value(TmyKey::new(12, 31, 23), variable)
            + synthetic_value(TmyKey::new(1, 1, 0), variable))
            / 2.0;
        assert_close(day.value(0, variable).unwrap(), expected);
        Ok(())
    }

    #[test]
    fn test_month_end_closes_on_next_month() -> Result<(), InterpolationError> {
        let tmy = synthetic_table();
        let groups = single_day(vec![at(2023, 4, 30, 23, 30, 0)]);
        let climate = interpolate_climate(&groups, &tmy, InterpolationMethod::Linear)?;

        let variable = TmyVariable::GlobalHorizontal;
        let expected = (synthetic_value(TmyKey::new(4, 30, 23), variable)
            + synthetic_value(TmyKey::new(5, 1, 0), variable))
            / 2.0;
        assert_close(
            climate[&DayKey::new(2023, 4, 30)].value(0, variable).unwrap(),
            expected,
        );
        Ok(())
    }

    #[test]
    fn test_smooth_methods_differ_between_nodes() -> Result<(), InterpolationError> {
        let tmy = table_from_fn(|key| f64::from(key.hour * key.hour));
        let groups = single_day(vec![at(2023, 9, 1, 5, 30, 0)]);
        let value = |method| -> Result<f64, InterpolationError> {
            let climate = interpolate_climate(&groups, &tmy, method)?;
            Ok(climate[&DayKey::new(2023, 9, 1)]
                .value(0, TmyVariable::RelativeHumidity)
                .unwrap())
        };

        // hours 0..=23 follow hour², the closing node drops back to 0
        assert_close(value(InterpolationMethod::Linear)?, (25.0 + 36.0) / 2.0);
        assert!((value(InterpolationMethod::Cubic)? - 5.5 * 5.5).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_groups_keep_keys_and_order() -> Result<(), InterpolationError> {
        let stamps = vec![
            at(2023, 1, 1, 12, 0, 0),
            at(2023, 1, 1, 6, 0, 0),
            at(2023, 7, 4, 9, 10, 11),
            at(2024, 2, 29, 0, 0, 0),
        ];
        let groups = group_by_day(stamps);
        let climate = interpolate_climate(&groups, &synthetic_table(), InterpolationMethod::Quadratic)?;

        assert_eq!(climate.keys().collect::<Vec<_>>(), groups.keys().collect::<Vec<_>>());
        let january = &climate[&DayKey::new(2023, 1, 1)];
        assert_eq!(january.timestamps, groups[&DayKey::new(2023, 1, 1)]);
        assert_eq!(january.hms_float()?.get(0), Some(12.0));
        assert_eq!(january.hms_float()?.get(1), Some(6.0));
        Ok(())
    }

    #[test]
    fn test_empty_group_yields_empty_frame() -> Result<(), InterpolationError> {
        let mut groups = BTreeMap::new();
        groups.insert(DayKey::new(2023, 10, 10), Vec::new());
        let climate = interpolate_climate(&groups, &synthetic_table(), InterpolationMethod::Linear)?;
        let day = &climate[&DayKey::new(2023, 10, 10)];
        assert!(day.is_empty());
        assert_eq!(day.frame.shape(), (0, 1 + TmyVariable::ALL.len()));
        Ok(())
    }

    #[test]
    fn test_rejects_timestamp_from_another_day() {
        let mut groups = BTreeMap::new();
        groups.insert(
            DayKey::new(2023, 1, 1),
            vec![at(2023, 1, 1, 23, 0, 0), at(2023, 1, 2, 0, 0, 0)],
        );
        let result = interpolate_climate(&groups, &synthetic_table(), InterpolationMethod::Linear);
        assert!(matches!(
            result,
            Err(InterpolationError::MalformedTargetTimestamp { day, timestamp })
                if day == DayKey::new(2023, 1, 1) && timestamp == at(2023, 1, 2, 0, 0, 0)
        ));
    }

    #[test]
    fn test_rejects_invalid_day_key() {
        let mut groups = BTreeMap::new();
        groups.insert(DayKey::new(2023, 2, 29), Vec::new());
        let result = interpolate_climate(&groups, &synthetic_table(), InterpolationMethod::Linear);
        assert!(matches!(
            result,
            Err(InterpolationError::InvalidDayKey(day)) if day == DayKey::new(2023, 2, 29)
        ));
    }
}
