use crate::interpolation::error::InterpolationError;
use crate::tmy_data::error::TmyDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PvgisTmyError {
    #[error(transparent)]
    TmyData(#[from] TmyDataError),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    #[error("Latitude {0} is outside the valid range -90..=90")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside the valid range -180..=180")]
    InvalidLongitude(f64),

    #[error("Unknown time zone '{0}', expected a UTC offset like '-05:00' or an IANA name")]
    UnknownTimeZone(String),

    #[error("Start year {start_year} is after end year {end_year}")]
    InvalidYearRange { start_year: i32, end_year: i32 },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
