//! Typed accessors over the Content Island headless CMS.
//!
//! This crate provides a [`ContentRepository`] with one accessor per
//! (entity, lookup) pair for the site's content model ([`Root`], [`Folder`],
//! [`Item`]) and a navigation aggregator that resolves the whole folder tree
//! in one call.
//!
//! # Architecture
//!
//! - [`ContentSource`] trait: the remote service contract (`get_content`,
//!   `get_content_list`)
//! - [`ContentIslandClient`]: sync HTTP implementation with bearer auth
//! - [`MockSource`]: in-memory implementation for tests (behind `mock` feature)
//! - [`ContentRepository`]: failure-isolated accessors; errors are reported to
//!   a [`DiagnosticSink`] and replaced by `None` or an empty `Vec`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use isle_content::{ContentIslandClient, ContentRepository};
//!
//! let client = ContentIslandClient::new(&token);
//! let repo = ContentRepository::new(Arc::new(client));
//!
//! for folder in repo.navigation().folders {
//!     println!("{} ({} items)", folder.title, folder.items.len());
//! }
//! ```

mod client;
mod diagnostics;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod navigation;
mod query;
mod record;
mod repository;
mod source;
mod types;

pub use client::{ContentIslandClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
#[cfg(any(test, feature = "mock"))]
pub use diagnostics::RecordingSink;
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::ContentError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use navigation::{NavigationOrder, order_by_ids};
pub use query::{ContentQuery, IdFilter};
pub use record::{ContentRecord, ContentTypeRef, Field};
pub use repository::ContentRepository;
pub use source::ContentSource;
pub use types::{Entity, Folder, Item, Language, Navigation, NavigationFolder, Root};
