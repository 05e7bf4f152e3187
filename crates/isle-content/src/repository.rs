//! Typed content accessors.
//!
//! [`ContentRepository`] wraps a [`ContentSource`] with one accessor per
//! (entity, lookup) pair. Accessors never fail: any error from the source,
//! including records that do not map to the model, is recorded as a
//! [`Diagnostic`] and replaced by `None` or an empty `Vec`.

use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ContentError;
use crate::navigation::NavigationOrder;
use crate::query::ContentQuery;
use crate::source::ContentSource;
use crate::types::{Entity, Folder, Item, Language, Root};

/// Failure-isolated accessors over a content source.
#[derive(Clone)]
pub struct ContentRepository {
    source: Arc<dyn ContentSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
    language: Language,
    pub(crate) navigation_order: NavigationOrder,
}

impl ContentRepository {
    /// Create a repository logging failures through `tracing`.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            diagnostics: Arc::new(TracingSink),
            language: Language::default(),
            navigation_order: NavigationOrder::default(),
        }
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Read content in the given language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Choose how [`navigation`](Self::navigation) orders folders and items.
    #[must_use]
    pub fn with_navigation_order(mut self, order: NavigationOrder) -> Self {
        self.navigation_order = order;
        self
    }

    /// Content language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Fetch the site root.
    pub fn root(&self) -> Option<Root> {
        self.fetch_one("root", self.query::<Root>())
    }

    /// Fetch every folder.
    pub fn folder_list(&self) -> Vec<Folder> {
        self.fetch_list("folder_list", self.query::<Folder>())
    }

    /// Fetch the folder with the given slug.
    pub fn folder_by_slug(&self, slug: &str) -> Option<Folder> {
        self.fetch_one("folder_by_slug", self.query::<Folder>().field("slug", slug))
    }

    /// Fetch a folder by identifier.
    pub fn folder_by_id(&self, id: &str) -> Option<Folder> {
        self.fetch_one("folder_by_id", self.query::<Folder>().id(id))
    }

    /// Fetch the folders whose identifiers are in `ids`.
    ///
    /// Order and completeness follow the service, not `ids`.
    pub fn folders_by_ids(&self, ids: &[String]) -> Vec<Folder> {
        self.fetch_by_ids("folders_by_ids", ids)
    }

    /// Fetch every item.
    pub fn item_list(&self) -> Vec<Item> {
        self.fetch_list("item_list", self.query::<Item>())
    }

    /// Fetch the item with the given slug.
    pub fn item_by_slug(&self, slug: &str) -> Option<Item> {
        self.fetch_one("item_by_slug", self.query::<Item>().field("slug", slug))
    }

    /// Fetch an item by identifier.
    pub fn item_by_id(&self, id: &str) -> Option<Item> {
        self.fetch_one("item_by_id", self.query::<Item>().id(id))
    }

    /// Fetch the items whose identifiers are in `ids`.
    ///
    /// Order and completeness follow the service, not `ids`.
    pub fn items_by_ids(&self, ids: &[String]) -> Vec<Item> {
        self.fetch_by_ids("items_by_ids", ids)
    }

    /// Record an absorbed failure.
    pub(crate) fn report(&self, operation: &'static str, message: impl Into<String>) {
        self.diagnostics.record(&Diagnostic::new(operation, message));
    }

    fn query<T: Entity>(&self) -> ContentQuery {
        ContentQuery::new()
            .content_type(T::CONTENT_TYPE)
            .language(self.language)
    }

    fn fetch_by_ids<T: Entity>(&self, operation: &'static str, ids: &[String]) -> Vec<T> {
        if ids.is_empty() {
            return Vec::new();
        }
        self.fetch_list(operation, self.query::<T>().ids_in(ids))
    }

    fn fetch_one<T: Entity>(&self, operation: &'static str, query: ContentQuery) -> Option<T> {
        let result = self
            .source
            .get_content(&query)
            .and_then(|record| record.into_model(self.language));
        self.absorb(operation, result)
    }

    fn fetch_list<T: Entity>(&self, operation: &'static str, query: ContentQuery) -> Vec<T> {
        let result = self.source.get_content_list(&query).and_then(|records| {
            records
                .into_iter()
                .map(|record| record.into_model(self.language))
                .collect::<Result<Vec<T>, _>>()
        });
        self.absorb(operation, result).unwrap_or_default()
    }

    fn absorb<T>(&self, operation: &'static str, result: Result<T, ContentError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(operation, err.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::mock::MockSource;
    use crate::record::ContentRecord;

    fn folder_record(id: &str, slug: &str, items: Option<&[&str]>) -> ContentRecord {
        let record = ContentRecord::new(id, "Folder")
            .with_field("title", format!("Folder {id}"))
            .with_field("slug", slug);
        match items {
            Some(items) => record.with_field("items", json!(items)),
            None => record,
        }
    }

    fn item_record(id: &str, slug: &str) -> ContentRecord {
        ContentRecord::new(id, "Item")
            .with_field("title", format!("Item {id}"))
            .with_field("slug", slug)
            .with_field("content", format!("# {id}"))
    }

    fn folder(id: &str, slug: &str, items: Option<&[&str]>) -> Folder {
        Folder {
            id: id.to_owned(),
            language: Language::En,
            title: format!("Folder {id}"),
            slug: slug.to_owned(),
            items: items.map(|ids| ids.iter().map(|&i| i.to_owned()).collect()),
        }
    }

    fn item(id: &str, slug: &str) -> Item {
        Item {
            id: id.to_owned(),
            language: Language::En,
            title: format!("Item {id}"),
            slug: slug.to_owned(),
            description: None,
            content: Some(format!("# {id}")),
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|&id| id.to_owned()).collect()
    }

    fn populated() -> MockSource {
        MockSource::new()
            .with_record(ContentRecord::new("root", "Root").with_field("folders", json!(["f1"])))
            .with_record(folder_record("f1", "guides", Some(&["i1", "i2"])))
            .with_record(folder_record("f2", "reference", None))
            .with_record(item_record("i1", "intro"))
            .with_record(item_record("i2", "setup"))
    }

    fn repository(source: MockSource) -> (ContentRepository, Arc<MockSource>, Arc<RecordingSink>) {
        let source = Arc::new(source);
        let sink = Arc::new(RecordingSink::new());
        let repo = ContentRepository::new(Arc::clone(&source) as Arc<dyn ContentSource>)
            .with_diagnostics(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
        (repo, source, sink)
    }

    #[test]
    fn test_root() {
        let (repo, _, sink) = repository(populated());
        let root = repo.root().unwrap();
        assert_eq!(
            root,
            Root {
                id: "root".to_owned(),
                language: Language::En,
                folders: ids(&["f1"]),
            }
        );
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_root_missing_is_none() {
        let (repo, _, sink) = repository(MockSource::new());
        assert_eq!(repo.root(), None);
        assert_eq!(sink.operations(), vec!["root"]);
    }

    #[test]
    fn test_folder_list() {
        let (repo, _, _) = repository(populated());
        assert_eq!(
            repo.folder_list(),
            vec![
                folder("f1", "guides", Some(&["i1", "i2"])),
                folder("f2", "reference", None),
            ]
        );
    }

    #[test]
    fn test_folder_by_slug() {
        let (repo, source, _) = repository(populated());
        assert_eq!(
            repo.folder_by_slug("reference"),
            Some(folder("f2", "reference", None))
        );
        assert_eq!(
            source.calls()[0].to_query_string(),
            "contentType=Folder&fields.slug=reference&language=en"
        );
    }

    #[test]
    fn test_folder_by_slug_not_found() {
        let (repo, _, sink) = repository(populated());
        assert_eq!(repo.folder_by_slug("missing"), None);
        assert_eq!(sink.operations(), vec!["folder_by_slug"]);
    }

    #[test]
    fn test_folder_by_id() {
        let (repo, source, _) = repository(populated());
        assert_eq!(
            repo.folder_by_id("f1"),
            Some(folder("f1", "guides", Some(&["i1", "i2"])))
        );
        assert_eq!(
            source.calls()[0].to_query_string(),
            "contentType=Folder&id=f1&language=en"
        );
    }

    #[test]
    fn test_folders_by_ids() {
        let (repo, _, _) = repository(populated());
        let folders = repo.folders_by_ids(&ids(&["f2", "f1"]));
        // Service order, not request order.
        let got: Vec<_> = folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(got, vec!["f1", "f2"]);
    }

    #[test]
    fn test_folders_by_ids_partial_miss() {
        let (repo, _, sink) = repository(populated());
        let folders = repo.folders_by_ids(&ids(&["f1", "gone"]));
        assert_eq!(folders, vec![folder("f1", "guides", Some(&["i1", "i2"]))]);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_folders_by_ids_empty_skips_service() {
        let (repo, source, sink) = repository(populated());
        assert!(repo.folders_by_ids(&[]).is_empty());
        assert_eq!(source.call_count(), 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_item_list() {
        let (repo, _, _) = repository(populated());
        assert_eq!(
            repo.item_list(),
            vec![item("i1", "intro"), item("i2", "setup")]
        );
    }

    #[test]
    fn test_item_by_slug() {
        let (repo, _, _) = repository(populated());
        assert_eq!(repo.item_by_slug("setup"), Some(item("i2", "setup")));
    }

    #[test]
    fn test_item_by_id() {
        let (repo, _, _) = repository(populated());
        assert_eq!(repo.item_by_id("i1"), Some(item("i1", "intro")));
    }

    #[test]
    fn test_items_by_ids() {
        let (repo, source, _) = repository(populated());
        assert_eq!(
            repo.items_by_ids(&ids(&["i1", "i2"])),
            vec![item("i1", "intro"), item("i2", "setup")]
        );
        assert_eq!(
            source.calls()[0].to_query_string(),
            "contentType=Item&id[in]=i1,i2&language=en"
        );
    }

    #[test]
    fn test_items_by_ids_empty_skips_service() {
        let (repo, source, _) = repository(populated());
        assert!(repo.items_by_ids(&[]).is_empty());
        assert_eq!(source.call_count(), 0);
    }

    #[test]
    fn test_every_accessor_returns_sentinel_on_failure() {
        let (repo, _, sink) = repository(MockSource::failing());

        assert_eq!(repo.root(), None);
        assert!(repo.folder_list().is_empty());
        assert_eq!(repo.folder_by_slug("guides"), None);
        assert_eq!(repo.folder_by_id("f1"), None);
        assert!(repo.folders_by_ids(&ids(&["f1"])).is_empty());
        assert!(repo.item_list().is_empty());
        assert_eq!(repo.item_by_slug("intro"), None);
        assert_eq!(repo.item_by_id("i1"), None);
        assert!(repo.items_by_ids(&ids(&["i1"])).is_empty());

        assert_eq!(
            sink.operations(),
            vec![
                "root",
                "folder_list",
                "folder_by_slug",
                "folder_by_id",
                "folders_by_ids",
                "item_list",
                "item_by_slug",
                "item_by_id",
                "items_by_ids",
            ]
        );
        assert!(sink.events()[0].message.contains("500"));
    }

    #[test]
    fn test_malformed_record_is_sentinel() {
        // Folder without a slug field
        let source = MockSource::new()
            .with_record(ContentRecord::new("f1", "Folder").with_field("title", "Broken"));
        let (repo, _, sink) = repository(source);

        assert!(repo.folder_list().is_empty());
        assert_eq!(repo.folder_by_id("f1"), None);
        assert_eq!(sink.operations(), vec!["folder_list", "folder_by_id"]);
        assert!(sink.events()[0].message.contains("does not map to Folder"));
    }

    #[test]
    fn test_tracing_sink_is_default() {
        let repo = ContentRepository::new(Arc::new(MockSource::failing()));
        // Logged through tracing, still a sentinel.
        assert_eq!(repo.root(), None);
        assert_eq!(repo.language(), Language::En);
    }
}
