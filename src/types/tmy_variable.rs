//! The climate variables carried by a PVGIS Typical Meteorological Year.

use std::fmt;

/// One hourly climate variable of a TMY.
///
/// The canonical column name of each variable is the PVGIS short name, e.g. `"T2m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TmyVariable {
    /// 2-m air temperature (°C).
    AirTemperature,
    /// Relative humidity (%).
    RelativeHumidity,
    /// Global irradiance on the horizontal plane (W/m²).
    GlobalHorizontal,
    /// Beam irradiance on a plane always normal to the sun rays (W/m²).
    BeamNormal,
    /// Diffuse irradiance on the horizontal plane (W/m²).
    DiffuseHorizontal,
    /// Surface infrared (thermal) irradiance on a horizontal plane (W/m²).
    InfraredHorizontal,
    /// 10-m total wind speed (m/s).
    WindSpeed,
    /// 10-m wind direction, 0 = N, 90 = E (°).
    WindDirection,
    /// Surface air pressure (Pa).
    SurfacePressure,
}

impl TmyVariable {
    /// Every variable, in column order.
    pub const ALL: [TmyVariable; 9] = [
        TmyVariable::AirTemperature,
        TmyVariable::RelativeHumidity,
        TmyVariable::GlobalHorizontal,
        TmyVariable::BeamNormal,
        TmyVariable::DiffuseHorizontal,
        TmyVariable::InfraredHorizontal,
        TmyVariable::WindSpeed,
        TmyVariable::WindDirection,
        TmyVariable::SurfacePressure,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            TmyVariable::AirTemperature => "T2m",
            TmyVariable::RelativeHumidity => "RH",
            TmyVariable::GlobalHorizontal => "G(h)",
            TmyVariable::BeamNormal => "Gb(n)",
            TmyVariable::DiffuseHorizontal => "Gd(h)",
            TmyVariable::InfraredHorizontal => "IR(h)",
            TmyVariable::WindSpeed => "WS10m",
            TmyVariable::WindDirection => "WD10m",
            TmyVariable::SurfacePressure => "SP",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            TmyVariable::AirTemperature => "°C",
            TmyVariable::RelativeHumidity => "%",
            TmyVariable::GlobalHorizontal
            | TmyVariable::BeamNormal
            | TmyVariable::DiffuseHorizontal
            | TmyVariable::InfraredHorizontal => "W/m2",
            TmyVariable::WindSpeed => "m/s",
            TmyVariable::WindDirection => "°",
            TmyVariable::SurfacePressure => "Pa",
        }
    }

    /// Looks a variable up by its canonical column name.
    pub fn from_column_name(name: &str) -> Option<TmyVariable> {
        TmyVariable::ALL
            .into_iter()
            .find(|variable| variable.column_name() == name)
    }
}

/// Formats a `TmyVariable` as its canonical column name.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::TmyVariable;
///
/// assert_eq!(TmyVariable::BeamNormal.to_string(), "Gb(n)");
/// ```
impl fmt::Display for TmyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
