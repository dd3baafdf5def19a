//! Products - the inventory records kept by the store.

mod photo;
mod price;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

pub use photo::Photo;
pub use price::format_price;

/// Opaque product identifier, generated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Allocate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ProductId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The mutable fields of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub photos: Vec<Photo>,
}

/// A stored product.
///
/// `id` and `created_at` are fixed at creation; everything in [`ProductFields`]
/// is overwritten wholesale by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    fields: ProductFields,
}

impl Product {
    pub(crate) fn new(fields: ProductFields) -> Self {
        Self {
            id: ProductId::new(),
            created_at: Utc::now(),
            fields,
        }
    }

    pub(crate) fn with_fields(mut self, fields: ProductFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn price(&self) -> Decimal {
        self.fields.price
    }

    pub fn stock(&self) -> u32 {
        self.fields.stock
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    /// Photos in the order they were attached.
    pub fn photos(&self) -> &[Photo] {
        &self.fields.photos
    }

    pub fn fields(&self) -> &ProductFields {
        &self.fields
    }

    /// Price rendered for display, e.g. `₱1,250.00`.
    pub fn display_price(&self, currency: &Currency) -> String {
        format_price(self.fields.price, currency)
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn key(&self) -> String {
        self.id.to_string()
    }
}
