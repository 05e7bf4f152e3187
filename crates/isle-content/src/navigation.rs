//! Navigation structure aggregation.
//!
//! Builds the folder → items tree in one call:
//! 1. Fetch the root; no root means empty navigation.
//! 2. Bulk-fetch the folders the root references.
//! 3. Resolve every folder's items at once on a rayon pool with one thread per
//!    folder, one bulk fetch per folder.
//! 4. Join and assemble in folder order.
//!
//! Every branch is isolated: a failed item fetch becomes `items: []` for that
//! folder only, and a panic in a branch is caught and reported the same way.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::repository::ContentRepository;
use crate::types::{Entity, Folder, Item, Navigation, NavigationFolder, Root};

/// Ordering of folders and items in the navigation tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationOrder {
    /// Keep the order the service returns from bulk fetches.
    #[default]
    Service,
    /// Follow the identifier order stored on the root and on each folder.
    Reference,
}

/// Reorder `records` to follow `ids`, skipping identifiers with no record.
///
/// Each record is emitted at most once, at the position of the first
/// occurrence of its identifier. Records whose identifiers are not in `ids`
/// are dropped.
#[must_use]
pub fn order_by_ids<T: Entity>(ids: &[String], records: Vec<T>) -> Vec<T> {
    order_by_key(ids, records, |record| record.id().to_owned())
}

fn order_by_key<T>(ids: &[String], records: Vec<T>, key: impl Fn(&T) -> String) -> Vec<T> {
    let mut by_id: HashMap<String, T> = records
        .into_iter()
        .map(|record| (key(&record), record))
        .collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

impl Navigation {
    /// Reorder folders to follow `ids`, dropping folders not listed.
    ///
    /// Items inside each folder keep their order.
    #[must_use]
    pub fn ordered_by(self, ids: &[String]) -> Self {
        Self {
            folders: order_by_key(ids, self.folders, |folder| folder.id.clone()),
        }
    }
}

impl ContentRepository {
    /// Build the navigation tree.
    ///
    /// Never fails: a missing root or any failure yields empty navigation,
    /// and failures inside one folder only empty that folder's items.
    pub fn navigation(&self) -> Navigation {
        match panic::catch_unwind(AssertUnwindSafe(|| self.build_navigation())) {
            Ok(navigation) => navigation,
            Err(payload) => {
                self.report("navigation", panic_message(payload.as_ref()));
                Navigation::empty()
            }
        }
    }

    fn build_navigation(&self) -> Navigation {
        let Some(root) = self.root() else {
            debug!("No root content, navigation is empty");
            return Navigation::empty();
        };

        let folders = self.resolve_folders(self.navigation_folders(&root));

        info!("Built navigation with {} folders", folders.len());
        Navigation { folders }
    }

    fn navigation_folders(&self, root: &Root) -> Vec<Folder> {
        let folders = self.folders_by_ids(&root.folders);
        match self.navigation_order {
            NavigationOrder::Service => folders,
            NavigationOrder::Reference => order_by_ids(&root.folders, folders),
        }
    }

    /// Resolve all folders at once on a pool with one thread per folder.
    ///
    /// Item fetches block on HTTP, so the width follows the folder count
    /// rather than the CPU count.
    fn resolve_folders(&self, folders: Vec<Folder>) -> Vec<NavigationFolder> {
        if folders.is_empty() {
            return Vec::new();
        }

        let width = folders.len();
        let resolve = || -> Vec<NavigationFolder> {
            folders
                .into_par_iter()
                .map(|folder| self.resolve_folder(folder))
                .collect()
        };

        match rayon::ThreadPoolBuilder::new().num_threads(width).build() {
            Ok(pool) => {
                debug!("Resolving {width} folders concurrently");
                pool.install(resolve)
            }
            Err(e) => {
                self.report(
                    "navigation",
                    format!("failed to create thread pool for {width} folders: {e}"),
                );
                resolve()
            }
        }
    }

    /// Resolve one folder's items, reporting a panic as empty items.
    fn resolve_folder(&self, folder: Folder) -> NavigationFolder {
        let Some(ids) = folder.items.as_deref() else {
            return NavigationFolder::new(folder, Vec::new());
        };

        let items = match panic::catch_unwind(AssertUnwindSafe(|| self.folder_items(ids))) {
            Ok(items) => items,
            Err(payload) => {
                self.report(
                    "navigation",
                    format!(
                        "resolving items of folder '{}': {}",
                        folder.id,
                        panic_message(payload.as_ref())
                    ),
                );
                Vec::new()
            }
        };
        NavigationFolder::new(folder, items)
    }

    fn folder_items(&self, ids: &[String]) -> Vec<Item> {
        let items = self.items_by_ids(ids);
        match self.navigation_order {
            NavigationOrder::Service => items,
            NavigationOrder::Reference => order_by_ids(ids, items),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_owned()
    }
}
