//! Random sample products for previews and demos.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::product::{Product, ProductFields};
use crate::repository::{ProductRepository, RepositoryError};

const NAMES: [&str; 5] = ["Product 1", "Product 2", "Product 3", "Product 4", "Product 5"];
const DESCRIPTIONS: [&str; 5] = [
    "Description 1",
    "Description 2",
    "Description 3",
    "Description 4",
    "Description 5",
];

/// Fields for a plausible product: price 1.00 to 100.00, stock 0 to 100.
pub fn random_fields<G: Rng>(rng: &mut G) -> ProductFields {
    let pick = rng.random_range(0..NAMES.len());

    ProductFields {
        name: NAMES[pick].to_string(),
        price: Decimal::new(rng.random_range(100..=10_000), 2),
        stock: rng.random_range(0..=100),
        description: DESCRIPTIONS[pick].to_string(),
        photos: Vec::new(),
    }
}

/// Create `count` random products.
pub fn seed<R, G>(repository: &R, count: usize, rng: &mut G) -> Result<Vec<Product>, RepositoryError>
where
    R: ProductRepository,
    G: Rng,
{
    let products = (0..count)
        .map(|_| repository.create(random_fields(rng)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count, "seeded sample products");
    Ok(products)
}
