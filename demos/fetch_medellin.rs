//! Fetches the TMY for Medellín and interpolates it onto a 5-minute grid for one week.

use chrono::{Duration, NaiveDate};
use polars::prelude::ChunkAgg;
use pvgis_tmy::{group_by_day, InterpolationMethod, LatLon, PvgisTmy, Site, TmyVariable};
use std::env;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    configure_polars_display();
    let client = PvgisTmy::new()?;
    let site = Site::new(LatLon(6.2518, -75.5636), "-05:00".parse()?)?;

    let tmy = client
        .fetch_tmy(&site)
        .start_year(2005)
        .end_year(2015)
        .call()
        .await?;
    for selected in tmy.months_selected() {
        println!("Month {:>2} taken from {}", selected.month, selected.year);
    }

    // One week in March, every 5 minutes
    let start = NaiveDate::from_ymd_opt(2023, 3, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let stamps = (0..7 * 288).map(|i| start + Duration::minutes(5 * i));
    let climate = tmy.interpolate(&group_by_day(stamps), InterpolationMethod::Cubic)?;

    for (day, frame) in &climate {
        let temperature = frame.column(TmyVariable::AirTemperature)?;
        println!(
            "{}: {} rows, T2m min {:?} max {:?}",
            day,
            frame.len(),
            temperature.min(),
            temperature.max()
        );
    }
    if let Some(first) = climate.values().next() {
        println!("{}", first.frame);
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
