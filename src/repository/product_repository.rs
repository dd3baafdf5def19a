use tracing::{debug, info};

use super::{ChangeEvent, ChangeFeed, RepositoryError, SubscriptionId};
use crate::product::{Product, ProductFields, ProductId};
use crate::store::RecordStore;

/// Typed access to the product collection.
///
/// Controllers take an implementation by value; implementations are cheap handles
/// over shared storage.
pub trait ProductRepository {
    /// Allocate an id and creation time, write the record and return it.
    fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError>;

    /// Overwrite every mutable field of an existing product.
    fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, RepositoryError>;

    /// Remove a product permanently.
    fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Remove every listed product that still exists. Missing ids are skipped
    /// without being reported.
    fn delete_many<I>(&self, ids: I) -> Result<(), RepositoryError>
    where
        I: IntoIterator<Item = ProductId>;

    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// All products in store order.
    fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Register a listener for committed changes.
    fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static;

    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// [`ProductRepository`] over any [`RecordStore`].
#[derive(Clone)]
pub struct StoreProductRepository<S> {
    store: S,
    feed: ChangeFeed,
}

impl<S: RecordStore> StoreProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            feed: ChangeFeed::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}

impl<S: RecordStore> ProductRepository for StoreProductRepository<S> {
    fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        let product = Product::new(fields);
        self.store.insert(&product)?;

        info!(product_id = %product.id(), name = product.name(), "created product");
        self.feed.emit(&ChangeEvent::Created(product.id()));

        Ok(product)
    }

    fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, RepositoryError> {
        let existing: Product = self
            .store
            .get(&id.to_string())?
            .ok_or(RepositoryError::NotFound(id))?;

        let updated = existing.with_fields(fields);
        self.store.put(&updated)?;

        info!(product_id = %id, "updated product");
        self.feed.emit(&ChangeEvent::Updated(id));

        Ok(updated)
    }

    fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        if !self.store.delete::<Product>(&id.to_string())? {
            return Err(RepositoryError::NotFound(id));
        }

        info!(product_id = %id, "deleted product");
        self.feed.emit(&ChangeEvent::Deleted(vec![id]));

        Ok(())
    }

    fn delete_many<I>(&self, ids: I) -> Result<(), RepositoryError>
    where
        I: IntoIterator<Item = ProductId>,
    {
        let mut removed = Vec::new();
        let mut skipped = 0usize;

        for id in ids {
            if self.store.delete::<Product>(&id.to_string())? {
                removed.push(id);
            } else {
                skipped += 1;
            }
        }

        info!(removed = removed.len(), skipped, "deleted products");
        if !removed.is_empty() {
            self.feed.emit(&ChangeEvent::Deleted(removed));
        }

        Ok(())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.store.get(&id.to_string())?)
    }

    fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products: Vec<Product> = self.store.get_all()?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.feed.on(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.feed.remove_listener(id)
    }
}
