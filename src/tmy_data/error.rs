use crate::types::keys::TmyKey;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmyDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // PVGIS answers bad parameters with a JSON body carrying a message
    #[error("PVGIS rejected the request for {url} with status {status}: {message}")]
    ApiRejected {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Failed to decode TMY response from {0}")]
    ResponseDecode(String, #[source] serde_json::Error),

    #[error("Failed to read TMY response file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse UTC timestamp '{value}'")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("TMY contains a February 29 row at '{0}'")]
    LeapDayRow(String),

    #[error("Expected {expected} hourly TMY rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("TMY row key {0} is not an hour of a non-leap year")]
    InvalidKey(TmyKey),

    #[error("TMY row key {0} occurs more than once")]
    DuplicateKey(TmyKey),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
