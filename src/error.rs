// src/error.rs
use thiserror::Error;

/// Failures from the backend API, the geocoding provider or local setup.
/// Components turn these into display text; none of them is fatal to the window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not complete (connect, timeout, broken body).
    #[error("Network error: {0}")]
    Network(String),

    /// 404 on the ranking lookup.
    #[error("No ranking data available for this school")]
    NotFound,

    /// Any other non-2xx answer.
    #[error("{what} (HTTP {status})")]
    Status { what: &'static str, status: u16 },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Geocoding provider answered with a non-OK status or no results.
    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Config(String),

    #[error("Map image could not be decoded: {0}")]
    Image(String),
}

impl FetchError {
    /// Soft errors render as an empty state rather than a failure.
    pub fn is_soft(&self) -> bool {
        matches!(self, FetchError::NotFound)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<image::ImageError> for FetchError {
    fn from(e: image::ImageError) -> Self {
        FetchError::Image(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
