use thiserror::Error;

/// Failures at the provider boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Non-OK status for the requested city or coordinates.
    #[error("City not found")]
    NotFound { status: u16 },

    /// Transport-level failure; the message is shown as-is.
    #[error("{0}")]
    Network(String),

    /// Provider returned a payload that doesn't match the expected schema.
    #[error("Unexpected response from weather provider: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the `appid` credential.
        ProviderError::Network(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::MalformedResponse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access denied")]
    PermissionDenied,

    #[error("Geolocation is not supported")]
    Unsupported,
}
