//! Error types for the content service.

/// Error from content service operations.
///
/// These never cross the public accessor boundary: [`ContentRepository`]
/// records them as diagnostics and returns an empty value instead.
///
/// [`ContentRepository`]: crate::ContentRepository
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContentError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record matched a single-record query.
    #[error("no content matches {query}")]
    NotFound {
        /// Query string that matched nothing.
        query: String,
    },

    /// A record did not have the shape of the requested model.
    #[error("content '{id}' does not map to {model}: {source}")]
    Mapping {
        /// Record identifier.
        id: String,
        /// Target model name.
        model: &'static str,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// Language tag not supported by the content model.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl ContentError {
    /// Whether the error means the content simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::HttpResponse { status: 404, .. })
    }
}
