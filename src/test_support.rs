//! Synthetic TMY fixtures shared by the unit tests.

use crate::tmy_data::response::{
    PvgisHourlyRecord, PvgisMonthSelected, PvgisOutputs, PvgisTmyResponse,
};
use crate::types::keys::{days_in_month, TmyKey};
use crate::types::tmy_table::{TmyHour, TmyTable};
use crate::types::tmy_variable::TmyVariable;

/// Hour of the year (0..8760) of a key.
pub(crate) fn hour_of_year(key: TmyKey) -> u32 {
    let days_before: u32 = (1..key.month).map(days_in_month).sum();
    (days_before + key.day - 1) * 24 + key.hour
}

/// A value unique to every (key, variable) pair.
pub(crate) fn synthetic_value(key: TmyKey, variable: TmyVariable) -> f64 {
    let column = TmyVariable::ALL
        .iter()
        .position(|v| *v == variable)
        .unwrap();
    f64::from(hour_of_year(key)) + 10_000.0 * column as f64
}

pub(crate) fn synthetic_hours() -> Vec<TmyHour> {
    TmyKey::all()
        .map(|key| TmyHour::from_fn(key, |variable| synthetic_value(key, variable)))
        .collect()
}

pub(crate) fn synthetic_table() -> TmyTable {
    TmyTable::from_hours(synthetic_hours()).unwrap()
}

/// A table whose every variable follows `value(key)`.
pub(crate) fn table_from_fn(value: impl Fn(TmyKey) -> f64) -> TmyTable {
    let hours = TmyKey::all()
        .map(|key| TmyHour::from_fn(key, |_| value(key)))
        .collect();
    TmyTable::from_hours(hours).unwrap()
}

fn year_of_month(month: u32) -> i32 {
    // February comes from a leap year on purpose
    if month == 2 {
        2008
    } else {
        2005 + month as i32
    }
}

/// A PVGIS response whose rows are UTC-stamped with the keys of [`synthetic_table`].
pub(crate) fn synthetic_response() -> PvgisTmyResponse {
    let tmy_hourly = TmyKey::all()
        .map(|key| {
            let value = |variable| synthetic_value(key, variable);
            PvgisHourlyRecord {
                time_utc: format!(
                    "{:04}{:02}{:02}:{:02}00",
                    year_of_month(key.month),
                    key.month,
                    key.day,
                    key.hour
                ),
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
        })
        .collect();
    let months_selected = (1..=12)
        .map(|month| PvgisMonthSelected {
            month,
            year: year_of_month(month),
        })
        .collect();

    PvgisTmyResponse {
        inputs: None,
        outputs: PvgisOutputs {
            months_selected,
            tmy_hourly,
        },
    }
}
