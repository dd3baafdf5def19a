use thiserror::Error;

use crate::product::ProductId;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}
