//! Content source trait.

use crate::error::ContentError;
use crate::query::ContentQuery;
use crate::record::ContentRecord;

/// Remote content service.
///
/// Provides a unified interface over the Content Island API so that
/// accessors and the navigation aggregator can run against the HTTP client
/// or an in-memory source in tests.
///
/// Implementations own their connection and authentication state and are
/// shared across threads.
pub trait ContentSource: Send + Sync {
    /// Fetch the single record matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] when nothing matches, or a transport,
    /// status, or decoding error.
    fn get_content(&self, query: &ContentQuery) -> Result<ContentRecord, ContentError>;

    /// Fetch every record matching `query`, in service order.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decoding error.
    fn get_content_list(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, ContentError>;
}
