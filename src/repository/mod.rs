//! Product repository - typed facade over a record store, with change notifications.

mod change_feed;
mod error;
mod product_repository;

pub use change_feed::{ChangeEvent, ChangeFeed, SubscriptionId};
pub use error::RepositoryError;
pub use product_repository::{ProductRepository, StoreProductRepository};
