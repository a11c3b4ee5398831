pub mod downloader;
pub mod error;
pub mod normalizer;
pub mod response;
