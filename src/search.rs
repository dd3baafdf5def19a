//! Name search over an in-memory product list.

use crate::product::Product;

/// Products whose name contains `query`, ignoring case, in their original order.
///
/// An empty query matches everything.
pub fn filter<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.name().to_lowercase().contains(&needle))
        .collect()
}
