//! Geocoder error types.

/// Errors that can occur when calling a geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client misconfiguration (bad header value, etc.)
    #[error("invalid configuration: {0}")]
    Config(String),
}
