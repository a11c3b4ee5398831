use crate::tmy_data::error::TmyDataError;
use crate::tmy_data::response::{PvgisErrorBody, PvgisTmyResponse};
use crate::types::client_config::{ClientConfig, RetryPolicy};
use crate::types::site::LatLon;
use log::{info, warn};
use reqwest::Client;

/// Parameters of one TMY request.
#[derive(Debug, Clone, PartialEq)]
pub struct TmyRequest<'a> {
    pub location: LatLon,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub use_horizon: bool,
    /// Horizon elevations (degrees) at equally spaced azimuths clockwise from north.
    pub user_horizon: Option<&'a [f64]>,
}

impl TmyRequest<'_> {
    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", self.location.0.to_string()),
            ("lon", self.location.1.to_string()),
            ("outputformat", "json".to_string()),
            ("usehorizon", u8::from(self.use_horizon).to_string()),
        ];
        if let Some(horizon) = self.user_horizon.filter(|_| self.use_horizon) {
            let joined = horizon
                .iter()
                .map(|elevation| elevation.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("userhorizon", joined));
        }
        if let Some(start_year) = self.start_year {
            params.push(("startyear", start_year.to_string()));
        }
        if let Some(end_year) = self.end_year {
            params.push(("endyear", end_year.to_string()));
        }
        params
    }
}

pub struct TmyDownloader {
    client: Client,
    tmy_url: String,
    retry_policy: RetryPolicy,
}

impl TmyDownloader {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            tmy_url: format!("{}/tmy", config.base_url.trim_end_matches('/')),
            retry_policy: config.retry_policy,
        })
    }

    /// Downloads a TMY, retrying transient failures per the configured [`RetryPolicy`].
    pub async fn download(
        &self,
        request: &TmyRequest<'_>,
    ) -> Result<PvgisTmyResponse, TmyDataError> {
        let params = request.query_params();
        let max_attempts = self.retry_policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.download_once(&params).await {
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && attempt < max_attempts => {
                    let wait = self.retry_policy.backoff(attempt);
                    warn!(
                        "TMY request attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt, max_attempts, e, wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn download_once(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<PvgisTmyResponse, TmyDataError> {
        let url = self.tmy_url.clone();
        info!("Downloading TMY from {} with {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| TmyDataError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PvgisErrorBody>(&body)
                .map(|error| error.message)
                .unwrap_or(body);
            warn!("PVGIS rejected TMY request ({}): {}", status, message);
            return Err(TmyDataError::ApiRejected {
                url,
                status,
                message,
            });
        }

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    TmyDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    TmyDataError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| TmyDataError::NetworkRequest(url.clone(), e))?;
        info!("Downloaded {} bytes of TMY data", body.len());
        serde_json::from_str(&body).map_err(|e| TmyDataError::ResponseDecode(url, e))
    }
}

fn is_transient(error: &TmyDataError) -> bool {
    match error {
        TmyDataError::NetworkRequest(..) => true,
        TmyDataError::HttpStatus { status, .. } => status.is_server_error(),
        _ => false,
    }
}
