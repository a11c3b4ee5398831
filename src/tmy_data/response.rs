//! Serde model of the PVGIS `tmy` endpoint's JSON output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisTmyResponse {
    #[serde(default)]
    pub inputs: Option<PvgisInputs>,
    pub outputs: PvgisOutputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisInputs {
    pub location: Option<PvgisLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisOutputs {
    #[serde(default)]
    pub months_selected: Vec<PvgisMonthSelected>,
    pub tmy_hourly: Vec<PvgisHourlyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisMonthSelected {
    pub month: u32,
    pub year: i32,
}

/// One hourly row, timestamped in UTC as `YYYYMMDD:HHMM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvgisHourlyRecord {
    #[serde(rename = "time(UTC)")]
    pub time_utc: String,
    #[serde(rename = "T2m")]
    pub air_temperature: f64,
    #[serde(rename = "RH")]
    pub relative_humidity: f64,
    #[serde(rename = "G(h)")]
    pub global_horizontal: f64,
    #[serde(rename = "Gb(n)")]
    pub beam_normal: f64,
    #[serde(rename = "Gd(h)")]
    pub diffuse_horizontal: f64,
    #[serde(rename = "IR(h)")]
    pub infrared_horizontal: f64,
    #[serde(rename = "WS10m")]
    pub wind_speed: f64,
    #[serde(rename = "WD10m")]
    pub wind_direction: f64,
    #[serde(rename = "SP")]
    pub surface_pressure: f64,
}

/// Body PVGIS returns alongside a 4xx status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PvgisErrorBody {
    pub message: String,
}
