use thiserror::Error;

/// Errors surfaced by the search pipeline.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A platform name that does not map to a supported content source.
    /// Raised before any network call is attempted.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The external API returned an error payload or an invalid base URL was
    /// supplied.
    #[error("search API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<brandmon_core::CoreError> for SearchError {
    fn from(err: brandmon_core::CoreError) -> Self {
        match err {
            brandmon_core::CoreError::UnsupportedPlatform(name) => {
                SearchError::UnsupportedPlatform(name)
            }
            brandmon_core::CoreError::InvalidTimeRange(raw) => {
                SearchError::Api(format!("invalid time range: {raw}"))
            }
        }
    }
}
