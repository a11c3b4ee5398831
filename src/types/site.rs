//! Describes the geographic site a TMY is requested for: its coordinates and the
//! local time zone the hourly data is relabelled into.

use crate::error::PvgisTmyError;
use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use std::fmt;
use std::str::FromStr;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use pvgis_tmy::LatLon;
///
/// let medellin = LatLon(6.2518, -75.5636);
/// assert_eq!(medellin.0, 6.2518); // Latitude
/// assert_eq!(medellin.1, -75.5636); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The local time zone of a site.
///
/// Either a fixed UTC offset or an IANA zone name. Parse one from a string with
/// [`str::parse`]: offsets are tried first, then zone names.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::SiteTimeZone;
///
/// let bogota: SiteTimeZone = "-05:00".parse().unwrap();
/// let madrid: SiteTimeZone = "Europe/Madrid".parse().unwrap();
/// assert_eq!(bogota.to_string(), "-05:00");
/// assert_eq!(madrid.to_string(), "Europe/Madrid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteTimeZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl SiteTimeZone {
    /// The UTC offset used to relabel hourly TMY rows into local time.
    ///
    /// Named zones resolve to their standard offset (daylight saving ignored) at the given
    /// UTC instant, so every hour of the year is shifted by the same amount.
    pub fn standard_offset(&self, utc: NaiveDateTime) -> FixedOffset {
        match self {
            SiteTimeZone::Fixed(offset) => *offset,
            SiteTimeZone::Named(tz) => {
                let offset = tz.offset_from_utc_datetime(&utc);
                let seconds = offset.base_utc_offset().num_seconds();
                i32::try_from(seconds)
                    .ok()
                    .and_then(FixedOffset::east_opt)
                    .unwrap_or_else(|| offset.fix())
            }
        }
    }
}

impl FromStr for SiteTimeZone {
    type Err = PvgisTmyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(offset) = trimmed.parse::<FixedOffset>() {
            return Ok(SiteTimeZone::Fixed(offset));
        }
        trimmed
            .parse::<Tz>()
            .map(SiteTimeZone::Named)
            .map_err(|_| PvgisTmyError::UnknownTimeZone(s.to_string()))
    }
}

impl From<FixedOffset> for SiteTimeZone {
    fn from(offset: FixedOffset) -> Self {
        SiteTimeZone::Fixed(offset)
    }
}

impl From<Tz> for SiteTimeZone {
    fn from(tz: Tz) -> Self {
        SiteTimeZone::Named(tz)
    }
}

impl fmt::Display for SiteTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteTimeZone::Fixed(offset) => write!(f, "{}", offset),
            SiteTimeZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// A site for which a Typical Meteorological Year is requested.
///
/// Coordinates are validated on construction; a `Site` is immutable afterwards.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::{LatLon, Site};
///
/// let site = Site::new(LatLon(6.2518, -75.5636), "-05:00".parse().unwrap()).unwrap();
/// assert_eq!(site.latitude(), 6.2518);
///
/// assert!(Site::new(LatLon(91.0, 0.0), "UTC".parse().unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    location: LatLon,
    timezone: SiteTimeZone,
}

impl Site {
    /// Creates a new `Site`.
    ///
    /// # Errors
    ///
    /// Returns [`PvgisTmyError::InvalidLatitude`] or [`PvgisTmyError::InvalidLongitude`] if a
    /// coordinate is not finite or lies outside its range.
    pub fn new(location: LatLon, timezone: SiteTimeZone) -> Result<Self, PvgisTmyError> {
        let LatLon(latitude, longitude) = location;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PvgisTmyError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(PvgisTmyError::InvalidLongitude(longitude));
        }
        Ok(Self { location, timezone })
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.0
    }

    pub fn longitude(&self) -> f64 {
        self.location.1
    }

    pub fn timezone(&self) -> SiteTimeZone {
        self.timezone
    }
}
