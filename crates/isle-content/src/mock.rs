//! Mock content source for testing.
//!
//! Provides [`MockSource`] for unit testing without network access.

use std::sync::{Mutex, RwLock};

use crate::error::ContentError;
use crate::query::ContentQuery;
use crate::record::ContentRecord;
use crate::source::ContentSource;

type QueryPredicate = Box<dyn Fn(&ContentQuery) -> bool + Send + Sync>;

/// Mock content source for testing.
///
/// Stores records in memory and answers queries in insertion order, which
/// stands in for the service order. Use the builder methods to configure
/// records and injected failures; every query is logged for call-count
/// assertions.
///
/// # Example
///
/// ```ignore
/// use isle_content::{ContentQuery, ContentRecord, ContentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_record(ContentRecord::new("root", "Root").with_field("folders", vec!["f1"]));
///
/// let root = source.get_content(&ContentQuery::new().content_type("Root")).unwrap();
/// assert_eq!(source.call_count(), 1);
/// ```
#[derive(Default)]
pub struct MockSource {
    records: RwLock<Vec<ContentRecord>>,
    faults: RwLock<Vec<QueryPredicate>>,
    panics: RwLock<Vec<QueryPredicate>>,
    calls: Mutex<Vec<ContentQuery>>,
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("records", &self.records)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_record(self, record: ContentRecord) -> Self {
        self.records.write().unwrap().push(record);
        self
    }

    /// Fail every query matching `predicate` with a server error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_fault(
        self,
        predicate: impl Fn(&ContentQuery) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.faults.write().unwrap().push(Box::new(predicate));
        self
    }

    /// Panic on every query matching `predicate`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_panic(
        self,
        predicate: impl Fn(&ContentQuery) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.panics.write().unwrap().push(Box::new(predicate));
        self
    }

    /// Fail every query.
    #[must_use]
    pub fn failing() -> Self {
        Self::new().with_fault(|_| true)
    }

    /// Queries received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<ContentQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of queries received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Log the query and apply injected failures.
    fn receive(&self, query: &ContentQuery) -> Result<(), ContentError> {
        self.calls.lock().unwrap().push(query.clone());

        if self.panics.read().unwrap().iter().any(|p| p(query)) {
            panic!("injected panic for {query}");
        }
        if self.faults.read().unwrap().iter().any(|p| p(query)) {
            return Err(ContentError::HttpResponse {
                status: 500,
                body: format!("injected fault for {query}"),
            });
        }
        Ok(())
    }
}

impl ContentSource for MockSource {
    fn get_content(&self, query: &ContentQuery) -> Result<ContentRecord, ContentError> {
        self.receive(query)?;
        self.records
            .read()
            .unwrap()
            .iter()
            .find(|r| query.matches(r))
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                query: query.to_query_string(),
            })
    }

    fn get_content_list(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, ContentError> {
        self.receive(query)?;
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MockSource {
        MockSource::new()
            .with_record(ContentRecord::new("f1", "Folder").with_field("slug", "a"))
            .with_record(ContentRecord::new("f2", "Folder").with_field("slug", "b"))
            .with_record(ContentRecord::new("i1", "Item").with_field("slug", "a"))
    }

    #[test]
    fn test_get_content_first_match() {
        let source = source();
        let record = source
            .get_content(&ContentQuery::new().content_type("Item").field("slug", "a"))
            .unwrap();
        assert_eq!(record.id, "i1");
    }

    #[test]
    fn test_get_content_not_found() {
        let source = source();
        let err = source
            .get_content(&ContentQuery::new().id("missing"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_content_list_insertion_order() {
        let source = source();
        let records = source
            .get_content_list(&ContentQuery::new().content_type("Folder"))
            .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
    }

    #[test]
    fn test_fault_injection() {
        let source = source().with_fault(|q| q.content_type_filter() == Some("Item"));
        assert!(
            source
                .get_content_list(&ContentQuery::new().content_type("Item"))
                .is_err()
        );
        assert!(
            source
                .get_content_list(&ContentQuery::new().content_type("Folder"))
                .is_ok()
        );
        assert_eq!(source.call_count(), 2);
    }

    #[test]
    #[should_panic(expected = "injected panic")]
    fn test_panic_injection() {
        let source = source().with_panic(|_| true);
        let _ = source.get_content(&ContentQuery::new());
    }
}
