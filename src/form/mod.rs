//! Product form - a detached draft of product fields, committed on save.
//!
//! A form is seeded either empty (create) or from an existing product (edit).
//! Nothing reaches the repository until [`ProductForm::save`]; [`ProductForm::cancel`]
//! throws the draft away. Both consume the form, and so does dropping it, which also
//! aborts any photo loads still in flight.

mod photos;

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::product::{Photo, Product, ProductFields, ProductId};
use crate::repository::{ProductRepository, RepositoryError};

pub use photos::{PhotoError, PhotoSource};

/// Stock adjustments offered next to the stock field.
pub const STOCK_STEPS: [i64; 4] = [-10, -1, 1, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name cannot be empty.")]
    EmptyName,

    #[error("Price cannot be negative.")]
    NegativePrice,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A save that did not go through. Carries the untouched form for correction.
pub struct SaveRejected<R> {
    form: ProductForm<R>,
    error: FormError,
}

impl<R> SaveRejected<R> {
    pub fn error(&self) -> &FormError {
        &self.error
    }

    pub fn form(&self) -> &ProductForm<R> {
        &self.form
    }

    pub fn into_form(self) -> ProductForm<R> {
        self.form
    }

    pub fn into_parts(self) -> (ProductForm<R>, FormError) {
        (self.form, self.error)
    }
}

impl<R> fmt::Debug for SaveRejected<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveRejected")
            .field("product", &self.form.product)
            .field("error", &self.error)
            .finish()
    }
}

impl<R> fmt::Display for SaveRejected<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "save rejected: {}", self.error)
    }
}

impl<R> std::error::Error for SaveRejected<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub struct ProductForm<R> {
    repository: R,
    product: Option<ProductId>,
    draft: ProductFields,
    loads: JoinSet<(usize, Result<Vec<u8>, PhotoError>)>,
    picks: usize,
}

impl<R: ProductRepository> ProductForm<R> {
    /// Empty form for a new product.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            product: None,
            draft: ProductFields::default(),
            loads: JoinSet::new(),
            picks: 0,
        }
    }

    /// Form seeded from an existing product.
    pub fn edit(repository: R, product: &Product) -> Self {
        Self {
            repository,
            product: Some(product.id()),
            draft: product.fields().clone(),
            loads: JoinSet::new(),
            picks: 0,
        }
    }

    /// Form seeded from the stored product with `id`.
    pub fn edit_by_id(repository: R, id: ProductId) -> Result<Self, RepositoryError> {
        let product = repository.get(id)?.ok_or(RepositoryError::NotFound(id))?;
        Ok(Self::edit(repository, &product))
    }

    /// Whether saving updates an existing product rather than creating one.
    pub fn is_editing(&self) -> bool {
        self.product.is_some()
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product
    }

    pub fn draft(&self) -> &ProductFields {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.draft.price = price;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.draft.stock = stock;
    }

    pub fn increment_stock(&mut self, delta: u32) -> u32 {
        self.draft.stock = self.draft.stock.saturating_add(delta);
        self.draft.stock
    }

    /// Never goes below zero.
    pub fn decrement_stock(&mut self, delta: u32) -> u32 {
        self.draft.stock = self.draft.stock.saturating_sub(delta);
        self.draft.stock
    }

    /// Apply a signed step such as those in [`STOCK_STEPS`].
    pub fn apply_stock_step(&mut self, step: i64) -> u32 {
        let magnitude = u32::try_from(step.unsigned_abs()).unwrap_or(u32::MAX);
        if step < 0 {
            self.decrement_stock(magnitude)
        } else {
            self.increment_stock(magnitude)
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.draft.photos
    }

    /// The photo at `index`, if there is one.
    pub fn photo(&self, index: usize) -> Option<&Photo> {
        self.draft.photos.get(index)
    }

    pub fn attach_photo(&mut self, photo: impl Into<Photo>) {
        self.draft.photos.push(photo.into());
    }

    /// Remove the photo at `index`, shifting later photos down. Out-of-range
    /// indexes leave the photos untouched and return `None`.
    pub fn remove_photo(&mut self, index: usize) -> Option<Photo> {
        if index < self.draft.photos.len() {
            Some(self.draft.photos.remove(index))
        } else {
            None
        }
    }

    /// Start loading each picked item in its own task.
    ///
    /// Must be called from within a tokio runtime. Results are appended by
    /// [`ProductForm::collect_photos`] in pick order.
    pub fn load_photos<P, I>(&mut self, sources: I)
    where
        P: PhotoSource,
        I: IntoIterator<Item = P>,
    {
        for source in sources {
            let pick = self.picks;
            self.picks += 1;
            self.loads.spawn(async move { (pick, source.load_blob().await) });
        }
    }

    pub fn pending_photo_loads(&self) -> usize {
        self.loads.len()
    }

    /// Wait for in-flight loads, then append the successful ones in the order
    /// they were picked. Failed loads are dropped. Returns how many photos were
    /// appended.
    pub async fn collect_photos(&mut self) -> usize {
        let mut loaded = Vec::with_capacity(self.loads.len());

        while let Some(joined) = self.loads.join_next().await {
            match joined {
                Ok((pick, Ok(bytes))) => loaded.push((pick, bytes)),
                Ok((pick, Err(err))) => debug!(pick, error = %err, "dropped photo load"),
                Err(err) => debug!(error = %err, "photo load task ended early"),
            }
        }

        loaded.sort_by_key(|(pick, _)| *pick);
        let appended = loaded.len();
        self.draft
            .photos
            .extend(loaded.into_iter().map(|(_, bytes)| Photo::from(bytes)));

        appended
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.draft.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.draft.price.is_sign_negative() && !self.draft.price.is_zero() {
            return Err(ValidationError::NegativePrice);
        }
        Ok(())
    }

    /// Validate and commit the draft: update when editing, create otherwise.
    ///
    /// On success the form is finished. On failure the store is untouched and
    /// the form comes back inside [`SaveRejected`].
    pub fn save(self) -> Result<Product, SaveRejected<R>> {
        if let Err(err) = self.validate() {
            debug!(error = %err, "rejected product form");
            return Err(SaveRejected {
                form: self,
                error: err.into(),
            });
        }

        let result = match self.product {
            Some(id) => self.repository.update(id, self.draft.clone()),
            None => self.repository.create(self.draft.clone()),
        };

        match result {
            Ok(product) => Ok(product),
            Err(err) => {
                warn!(error = %err, product_id = ?self.product, "product save failed");
                Err(SaveRejected {
                    form: self,
                    error: err.into(),
                })
            }
        }
    }

    /// Discard the draft and abort any photo loads.
    pub fn cancel(mut self) {
        if !self.loads.is_empty() {
            debug!(pending = self.loads.len(), "aborting photo loads");
        }
        self.loads.abort_all();
    }
}
