use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
///
/// Every variant is fatal for the call that produced it; there is no retry
/// layer. Quota and rate-limit handling is a deliberate gap.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status; the message is taken from
    /// the error envelope when one is present.
    #[error("YouTube API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
