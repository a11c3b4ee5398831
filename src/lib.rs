mod error;
mod interpolation;
mod pvgis_tmy;
mod tmy_data;
mod types;

#[cfg(test)]
mod test_support;

pub use error::PvgisTmyError;
pub use pvgis_tmy::*;

pub use interpolation::daily::{fractional_hour, interpolate_climate, NODES_PER_DAY};
pub use interpolation::spline::{InterpolatingSpline, SplineEvaluator};

pub use tmy_data::response::*;

pub use types::climate_day_frame::*;
pub use types::client_config::*;
pub use types::interpolation_method::InterpolationMethod;
pub use types::keys::{group_by_day, DayKey, TmyKey, HOURS_PER_TMY};
pub use types::site::*;
pub use types::tmy_table::*;
pub use types::tmy_variable::TmyVariable;

pub use interpolation::error::InterpolationError;
pub use tmy_data::error::TmyDataError;
