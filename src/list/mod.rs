//! Product list - search, selection and deletion over the stored products.
//!
//! The list keeps its own copy of the product collection and re-fetches it after
//! its own mutations, or on [`ProductList::refresh`] once the repository has
//! announced a change made elsewhere (e.g. by a form).
//!
//! ```ignore
//! let mut list = ProductList::new(repository.clone())?;
//! list.set_query("widget");
//! list.toggle_edit_mode();
//! for id in list.visible().iter().map(|p| p.id()).collect::<Vec<_>>() {
//!     list.select(id);
//! }
//! list.batch_delete()?;
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::product::{Product, ProductId};
use crate::repository::{ProductRepository, RepositoryError, SubscriptionId};
use crate::search;

/// Interaction mode of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Normal browsing; single rows can be swiped away.
    #[default]
    Browsing,
    /// Edit mode; rows can be selected and deleted as a batch.
    Selecting,
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("swipe to delete is unavailable in edit mode")]
    EditModeActive,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct ProductList<R: ProductRepository> {
    repository: R,
    subscription: SubscriptionId,
    stale: Arc<AtomicBool>,
    products: Vec<Product>,
    query: String,
    mode: ListMode,
    selection: HashSet<ProductId>,
}

impl<R: ProductRepository> ProductList<R> {
    /// Subscribe to `repository` and load the current products.
    pub fn new(repository: R) -> Result<Self, RepositoryError> {
        let stale = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stale);
        let subscription = repository.subscribe(move |_| flag.store(true, Ordering::SeqCst));

        let mut list = Self {
            repository,
            subscription,
            stale,
            products: Vec::new(),
            query: String::new(),
            mode: ListMode::Browsing,
            selection: HashSet::new(),
        };
        list.reload()?;

        Ok(list)
    }

    /// Re-fetch if the repository reported a change since the last load.
    /// Returns whether a re-fetch happened.
    pub fn refresh(&mut self) -> Result<bool, RepositoryError> {
        if !self.stale.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }

    /// Re-fetch unconditionally. Selected ids that no longer exist are dropped.
    pub fn reload(&mut self) -> Result<(), RepositoryError> {
        self.stale.store(false, Ordering::SeqCst);
        self.products = self.repository.list_all()?;

        let present: HashSet<ProductId> = self.products.iter().map(Product::id).collect();
        self.selection.retain(|id| present.contains(id));

        Ok(())
    }

    /// Every product, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products matching the current query, in store order.
    pub fn visible(&self) -> Vec<&Product> {
        search::filter(&self.products, &self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == ListMode::Selecting
    }

    /// Enter or leave edit mode. Entering keeps any prior selection; leaving clears it.
    pub fn toggle_edit_mode(&mut self) -> ListMode {
        self.mode = match self.mode {
            ListMode::Browsing => ListMode::Selecting,
            ListMode::Selecting => {
                self.selection.clear();
                ListMode::Browsing
            }
        };
        self.mode
    }

    /// Add a listed product to the selection. Ignored outside edit mode.
    pub fn select(&mut self, id: ProductId) -> bool {
        if !self.is_selecting() || !self.products.iter().any(|p| p.id() == id) {
            return false;
        }
        self.selection.insert(id)
    }

    /// Ignored outside edit mode.
    pub fn deselect(&mut self, id: ProductId) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.selection.remove(&id)
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection(&self) -> &HashSet<ProductId> {
        &self.selection
    }

    /// Delete the product at `index` of the visible list.
    ///
    /// Returns the deleted id, or `None` when `index` is out of range or the
    /// product was already gone.
    pub fn swipe_delete(&mut self, index: usize) -> Result<Option<ProductId>, ListError> {
        if self.is_selecting() {
            return Err(ListError::EditModeActive);
        }

        let Some(id) = self.visible().get(index).map(|p| p.id()) else {
            return Ok(None);
        };

        let deleted = match self.repository.delete(id) {
            Ok(()) => Some(id),
            Err(err) if err.is_not_found() => {
                debug!(product_id = %id, "product already deleted");
                None
            }
            Err(err) => return Err(err.into()),
        };

        self.reload()?;
        Ok(deleted)
    }

    /// Delete every selected product, then clear the selection and leave edit mode.
    ///
    /// Does nothing when the selection is empty. Returns how many ids were submitted.
    pub fn batch_delete(&mut self) -> Result<usize, ListError> {
        if self.selection.is_empty() {
            return Ok(0);
        }

        let ids: Vec<ProductId> = self.selection.drain().collect();
        let submitted = ids.len();
        self.repository.delete_many(ids)?;

        self.mode = ListMode::Browsing;
        self.reload()?;

        Ok(submitted)
    }
}

impl<R: ProductRepository> Drop for ProductList<R> {
    fn drop(&mut self) {
        self.repository.unsubscribe(self.subscription);
    }
}
