//! Products

use rust_decimal::Decimal;
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone)]
pub struct Product {
    /// Product name
    pub name: String,

    /// URL slug, unique within a catalog
    pub slug: String,

    /// Current catalog price
    pub price: Decimal,

    /// Whether the product can be browsed and added to a cart
    pub is_available: bool,
}

impl Product {
    /// Create an available product with the given name, slug and price.
    pub fn new(name: impl Into<String>, slug: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            price,
            is_available: true,
        }
    }
}
