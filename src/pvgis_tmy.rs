//! This module provides the main entry point: a client that downloads a Typical
//! Meteorological Year from PVGIS for a [`Site`] and normalizes it into a [`TmyTable`]
//! keyed by local (month, day, hour).

use crate::error::PvgisTmyError;
use crate::tmy_data::downloader::{TmyDownloader, TmyRequest};
use crate::tmy_data::normalizer::normalize_response;
use crate::types::client_config::ClientConfig;
use crate::types::site::Site;
use crate::types::tmy_table::TmyTable;
use bon::bon;
use log::{info, warn};

/// Minimum span of years PVGIS needs to select representative months from.
const RECOMMENDED_MIN_SPAN_YEARS: i32 = 10;

/// The client for fetching Typical Meteorological Years from the PVGIS API.
///
/// Create an instance using [`PvgisTmy::new()`] for the public PVGIS 5.2 endpoint with the
/// default retry policy, or [`PvgisTmy::with_config()`] to change the endpoint, timeout or
/// retries.
///
/// # Examples
///
/// ```rust,no_run
/// # use pvgis_tmy::{LatLon, PvgisTmy, PvgisTmyError, Site};
/// # async fn run() -> Result<(), PvgisTmyError> {
/// let client = PvgisTmy::new()?;
/// let site = Site::new(LatLon(6.2518, -75.5636), "-05:00".parse()?)?;
///
/// let tmy = client.fetch_tmy(&site).start_year(2005).end_year(2015).call().await?;
/// assert_eq!(tmy.len(), 8760);
/// # Ok(())
/// # }
/// ```
pub struct PvgisTmy {
    downloader: TmyDownloader,
}

#[bon]
impl PvgisTmy {
    /// Creates a client for the public PVGIS API with [`ClientConfig::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`PvgisTmyError::HttpClient`] if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, PvgisTmyError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with a custom [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PvgisTmyError::HttpClient`] if the HTTP client cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pvgis_tmy::{ClientConfig, PvgisTmy, PvgisTmyError, RetryPolicy};
    /// # use std::time::Duration;
    /// # fn run() -> Result<(), PvgisTmyError> {
    /// let config = ClientConfig::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .retry_policy(RetryPolicy::none())
    ///     .build();
    /// let client = PvgisTmy::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self, PvgisTmyError> {
        let downloader = TmyDownloader::new(&config).map_err(PvgisTmyError::HttpClient)?;
        Ok(Self { downloader })
    }

    /// Fetches the TMY for `site` and relabels it into the site's local standard time.
    ///
    /// PVGIS returns 8760 hourly rows stamped in UTC, each month drawn from the most
    /// representative year of the requested range. The rows are shifted by the site's
    /// standard UTC offset and keyed by local (month, day, hour); hours pushed past the end
    /// of the year wrap around to its start.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `site` - The [`Site`] (coordinates and time zone). Passed to `fetch_tmy()`.
    /// * `start_year` - *(Optional)* First year PVGIS may select months from.
    /// * `end_year` - *(Optional)* Last year PVGIS may select months from.
    /// * `use_horizon` - *(Optional, default `false`)* Account for shading by the terrain horizon.
    /// * `user_horizon` - *(Optional)* Horizon elevations in degrees, at equally spaced
    ///   azimuths clockwise from north. Only sent when `use_horizon` is set.
    ///
    /// Leaving out the years lets PVGIS use its full database period.
    ///
    /// # Returns
    ///
    /// The normalized [`TmyTable`], with the months PVGIS selected in
    /// [`TmyTable::months_selected`].
    ///
    /// # Errors
    ///
    /// * [`PvgisTmyError::InvalidYearRange`] if `start_year` is after `end_year`.
    /// * [`PvgisTmyError::TmyData`] if the request fails after all retries, PVGIS rejects it
    ///   (e.g. a location over the sea), or the response is not a complete TMY.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use pvgis_tmy::{LatLon, PvgisTmy, PvgisTmyError, Site, TmyKey, TmyVariable};
    /// # async fn run() -> Result<(), PvgisTmyError> {
    /// let client = PvgisTmy::new()?;
    /// let site = Site::new(LatLon(40.4168, -3.7038), "Europe/Madrid".parse()?)?;
    ///
    /// let tmy = client
    ///     .fetch_tmy(&site)
    ///     .start_year(2010)
    ///     .end_year(2020)
    ///     .use_horizon(true)
    ///     .call()
    ///     .await?;
    ///
    /// let noon = tmy.value(TmyKey::new(6, 21, 12), TmyVariable::GlobalHorizontal);
    /// println!("G(h) at local noon on June 21: {:?}", noon);
    /// for selected in tmy.months_selected() {
    ///     println!("month {} taken from {}", selected.month, selected.year);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn fetch_tmy(
        &self,
        #[builder(start_fn)] site: &Site,
        start_year: Option<i32>,
        end_year: Option<i32>,
        #[builder(default)] use_horizon: bool,
        user_horizon: Option<Vec<f64>>,
    ) -> Result<TmyTable, PvgisTmyError> {
        if let (Some(start_year), Some(end_year)) = (start_year, end_year) {
            if start_year > end_year {
                return Err(PvgisTmyError::InvalidYearRange {
                    start_year,
                    end_year,
                });
            }
            if end_year - start_year + 1 < RECOMMENDED_MIN_SPAN_YEARS {
                warn!(
                    "Year range {}-{} spans less than {} years, the TMY may not be representative",
                    start_year, end_year, RECOMMENDED_MIN_SPAN_YEARS
                );
            }
        }
        if user_horizon.is_some() && !use_horizon {
            warn!("User horizon given but use_horizon is off, ignoring it");
        }

        let request = TmyRequest {
            location: site.location(),
            start_year,
            end_year,
            use_horizon,
            user_horizon: user_horizon.as_deref(),
        };
        let response = self.downloader.download(&request).await?;
        let table = normalize_response(response, site.timezone())?;

        info!(
            "Fetched TMY for ({}, {}) in {}: {} rows",
            site.latitude(),
            site.longitude(),
            site.timezone(),
            table.len()
        );
        Ok(table)
    }
}
