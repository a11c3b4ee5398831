//! Composite keys used to address TMY rows and target days.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::fmt;

/// Non-leap reference year used to validate (month, day) pairs of a TMY.
pub(crate) const REFERENCE_YEAR: i32 = 2001;

/// Number of hourly rows in a Typical Meteorological Year.
pub const HOURS_PER_TMY: usize = 8760;

/// Days in `month` of a non-leap year.
pub(crate) fn days_in_month(month: u32) -> u32 {
    match month {
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Addresses one hourly row of a TMY: (month 1-12, day-of-month, hour 0-23).
///
/// This is an ordering key, not a calendar date; it carries no year. The derived
/// ordering is lexicographic on (month, day, hour), which is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TmyKey {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl TmyKey {
    pub fn new(month: u32, day: u32, hour: u32) -> Self {
        Self { month, day, hour }
    }

    /// True when the key names an hour of a non-leap calendar year.
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && NaiveDate::from_ymd_opt(REFERENCE_YEAR, self.month, self.day).is_some()
    }

    /// All 8760 keys of a non-leap year, in ascending order.
    pub fn all() -> impl Iterator<Item = TmyKey> {
        (1..=12).flat_map(|month| {
            (1..=days_in_month(month))
                .flat_map(move |day| (0..24).map(move |hour| TmyKey::new(month, day, hour)))
        })
    }
}

impl fmt::Display for TmyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02} {:02}:00", self.month, self.day, self.hour)
    }
}

/// Addresses one calendar day of target timestamps: (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The calendar date this key names, or `None` if it is not a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Groups timestamps by calendar day, keeping their order within each day.
///
/// The result has the shape [`crate::interpolate_climate`] expects for its target groups.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pvgis_tmy::{group_by_day, DayKey};
///
/// let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let stamps = (0..48).map(|h| day.and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::hours(h));
/// let groups = group_by_day(stamps);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[&DayKey::new(2023, 1, 2)].len(), 24);
/// ```
pub fn group_by_day(
    timestamps: impl IntoIterator<Item = NaiveDateTime>,
) -> BTreeMap<DayKey, Vec<NaiveDateTime>> {
    let mut groups: BTreeMap<DayKey, Vec<NaiveDateTime>> = BTreeMap::new();
    for timestamp in timestamps {
        groups
            .entry(DayKey::from(timestamp.date()))
            .or_default()
            .push(timestamp);
    }
    groups
}
