//! Stockroom - an on-device inventory core.
//!
//! Products live in a [`store::RecordStore`] behind a [`ProductRepository`]. Two
//! controllers sit on top: [`ProductList`] (search, swipe-delete, multi-select
//! batch delete) and [`ProductForm`] (a detached draft that is validated and
//! committed on save). The list learns about changes made through other handles
//! from the repository's [`ChangeFeed`].
//!
//! ```ignore
//! let stockroom = Stockroom::open(&StockroomConfig::from_env()?)?;
//!
//! let mut form = stockroom.new_product_form();
//! form.set_name("Widget");
//! form.set_price(Decimal::new(1250, 2));
//! let widget = form.save()?;
//!
//! let mut list = stockroom.product_list()?;
//! list.set_query("widg");
//! assert_eq!(list.visible()[0].id(), widget.id());
//! ```

pub mod app;
pub mod config;
pub mod fixtures;
pub mod form;
pub mod list;
pub mod product;
pub mod repository;
pub mod search;
pub mod store;

pub use app::Stockroom;
pub use config::{ConfigError, StockroomConfig, StoreLocation};
pub use form::{
    FormError, PhotoError, PhotoSource, ProductForm, SaveRejected, ValidationError, STOCK_STEPS,
};
pub use list::{ListError, ListMode, ProductList};
pub use product::{format_price, Photo, Product, ProductFields, ProductId};
pub use repository::{
    ChangeEvent, ChangeFeed, ProductRepository, RepositoryError, StoreProductRepository,
    SubscriptionId,
};
pub use store::{InMemoryRecordStore, Record, RecordStore, StoreBackend, StoreError};
#[cfg(feature = "file")]
pub use store::FileRecordStore;
