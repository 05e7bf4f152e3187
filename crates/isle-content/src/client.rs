//! Content Island REST API client.
//!
//! Provides sync HTTP client for the Content Island delivery API with bearer
//! token authentication.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ContentError;
use crate::query::ContentQuery;
use crate::record::ContentRecord;
use crate::source::ContentSource;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.contentisland.net/api/1.0";

/// Content Island REST API client.
pub struct ContentIslandClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl ContentIslandClient {
    /// Create client for the default API endpoint.
    #[must_use]
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            access_token,
            Duration::from_secs(DEFAULT_TIMEOUT),
        )
    }

    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL including version
    ///   (e.g., `https://api.contentisland.net/api/1.0`)
    /// * `access_token` - Project access token
    /// * `timeout` - Global timeout per request
    #[must_use]
    pub fn with_base_url(base_url: &str, access_token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    /// Get the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for an endpoint and query.
    fn url(&self, endpoint: &str, query: &ContentQuery) -> String {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            format!("{}/{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}?{query_string}", self.base_url)
        }
    }

    /// Issue an authenticated GET and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ContentError> {
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ContentError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ContentSource for ContentIslandClient {
    fn get_content(&self, query: &ContentQuery) -> Result<ContentRecord, ContentError> {
        let url = self.url("content", query);
        single_record(self.get_json::<Option<ContentRecord>>(&url), query)
    }

    fn get_content_list(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, ContentError> {
        let url = self.url("contents", query);
        let records: Vec<ContentRecord> = self.get_json(&url)?;
        debug!("Received {} records for {}", records.len(), query);
        Ok(records)
    }
}

/// Normalize a single-record response.
///
/// The service answers an unmatched single lookup with `null` or 404; both
/// become [`ContentError::NotFound`].
fn single_record(
    response: Result<Option<ContentRecord>, ContentError>,
    query: &ContentQuery,
) -> Result<ContentRecord, ContentError> {
    match response {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(not_found(query)),
        Err(err) if err.is_not_found() => Err(not_found(query)),
        Err(err) => Err(err),
    }
}

fn not_found(query: &ContentQuery) -> ContentError {
    ContentError::NotFound {
        query: query.to_query_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record_null_is_not_found() {
        let query = ContentQuery::new().content_type("Item").id("i1");
        let err = single_record(Ok(None), &query).unwrap_err();
        assert!(matches!(
            err,
            ContentError::NotFound { ref query } if query == "contentType=Item&id=i1"
        ));
    }

    #[test]
    fn test_single_record_404_is_not_found() {
        let query = ContentQuery::new().id("i1");
        let response = Err(ContentError::HttpResponse {
            status: 404,
            body: "missing".to_owned(),
        });
        let err = single_record(response, &query).unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }

    #[test]
    fn test_single_record_keeps_other_errors() {
        let query = ContentQuery::new().id("i1");
        let response = Err(ContentError::HttpResponse {
            status: 500,
            body: "boom".to_owned(),
        });
        let err = single_record(response, &query).unwrap_err();
        assert!(matches!(err, ContentError::HttpResponse { status: 500, .. }));
    }

    #[test]
    fn test_single_record_passes_record_through() {
        let query = ContentQuery::new().id("i1");
        let record = ContentRecord::new("i1", "Item");
        assert_eq!(single_record(Ok(Some(record)), &query).unwrap().id, "i1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ContentIslandClient::with_base_url(
            "https://cms.example.com/api/1.0/",
            "token",
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url(), "https://cms.example.com/api/1.0");
    }

    #[test]
    fn test_default_base_url() {
        let client = ContentIslandClient::new("token");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_url_with_query() {
        let client = ContentIslandClient::new("token");
        let query = ContentQuery::new().content_type("Root");
        assert_eq!(
            client.url("content", &query),
            "https://api.contentisland.net/api/1.0/content?contentType=Root"
        );
    }

    #[test]
    fn test_url_without_query() {
        let client = ContentIslandClient::new("token");
        assert_eq!(
            client.url("contents", &ContentQuery::new()),
            "https://api.contentisland.net/api/1.0/contents"
        );
    }
}
