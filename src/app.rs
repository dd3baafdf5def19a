//! Application bootstrap: open the configured store and hand out controllers.

use rusty_money::iso::Currency;
use tracing::info;

use crate::config::{StockroomConfig, StoreLocation};
use crate::form::ProductForm;
use crate::list::ProductList;
use crate::product::{format_price, Product};
use crate::repository::{RepositoryError, StoreProductRepository};
#[cfg(feature = "file")]
use crate::store::FileRecordStore;
use crate::store::{InMemoryRecordStore, StoreBackend, StoreError};

pub type Repository = StoreProductRepository<StoreBackend>;

/// An opened inventory. Every controller it creates shares one repository.
#[derive(Clone)]
pub struct Stockroom {
    repository: Repository,
    currency: &'static Currency,
}

impl Stockroom {
    /// Open the store named by `config`. Failure here is fatal for the caller.
    pub fn open(config: &StockroomConfig) -> Result<Self, StoreError> {
        let backend = match &config.store {
            StoreLocation::InMemory => StoreBackend::from(InMemoryRecordStore::new()),
            #[cfg(feature = "file")]
            StoreLocation::File(path) => StoreBackend::from(FileRecordStore::open(path)?),
            #[cfg(not(feature = "file"))]
            StoreLocation::File(path) => {
                return Err(StoreError::Storage(format!(
                    "file store disabled, cannot open {}",
                    path.display()
                )))
            }
        };

        info!(store = ?config.store, currency = config.currency.iso_alpha_code, "opened stockroom");

        Ok(Self {
            repository: StoreProductRepository::new(backend),
            currency: config.currency,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub fn product_list(&self) -> Result<ProductList<Repository>, RepositoryError> {
        ProductList::new(self.repository.clone())
    }

    pub fn new_product_form(&self) -> ProductForm<Repository> {
        ProductForm::new(self.repository.clone())
    }

    pub fn edit_product_form(&self, product: &Product) -> ProductForm<Repository> {
        ProductForm::edit(self.repository.clone(), product)
    }

    pub fn display_price(&self, product: &Product) -> String {
        format_price(product.price(), self.currency)
    }
}
