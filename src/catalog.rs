//! Catalog
//!
//! Durable product records, read-only from the cart's perspective. The cart
//! subsystem only ever resolves products here; it never writes prices back.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors raised when populating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product with this slug already exists.
    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),
}

/// Read access to product records.
pub trait Catalog {
    /// Look up a product by key.
    fn product(&self, key: ProductKey) -> Option<&Product>;

    /// Look up a product by its unique slug.
    fn product_by_slug(&self, slug: &str) -> Option<(ProductKey, &Product)>;
}

/// In-memory catalog with a unique slug index.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: SlotMap<ProductKey, Product>,
    slugs: FxHashMap<String, ProductKey>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, enforcing slug uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSlug`] if a product with the same
    /// slug is already present.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        if self.slugs.contains_key(&product.slug) {
            return Err(CatalogError::DuplicateSlug(product.slug));
        }

        let slug = product.slug.clone();
        let key = self.products.insert(product);
        self.slugs.insert(slug, key);

        Ok(key)
    }

    /// Overwrite the price of an existing product.
    ///
    /// Returns `false` if the key does not resolve. Used to model catalog
    /// edits happening while a cart holds a price snapshot.
    pub fn set_price(&mut self, key: ProductKey, price: Decimal) -> bool {
        match self.products.get_mut(key) {
            Some(product) => {
                product.price = price;
                true
            }
            None => false,
        }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    fn product_by_slug(&self, slug: &str) -> Option<(ProductKey, &Product)> {
        let key = *self.slugs.get(slug)?;

        self.products.get(key).map(|product| (key, product))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn insert_and_resolve_by_key_and_slug() -> TestResult {
        let mut catalog = InMemoryCatalog::new();
        let key = catalog.insert(Product::new(
            "Biryani",
            "biryani-pastes",
            Decimal::new(450, 0),
        ))?;

        let by_key = catalog.product(key);
        assert_eq!(by_key.map(|p| p.name.as_str()), Some("Biryani"));

        let by_slug = catalog.product_by_slug("biryani-pastes");
        assert_eq!(by_slug.map(|(k, _)| k), Some(key));

        Ok(())
    }

    #[test]
    fn duplicate_slug_is_rejected() -> TestResult {
        let mut catalog = InMemoryCatalog::new();

        catalog.insert(Product::new("Handi", "handi", Decimal::new(480, 0)))?;

        let result = catalog.insert(Product::new("Handi 2", "handi", Decimal::new(490, 0)));

        assert!(matches!(result, Err(CatalogError::DuplicateSlug(_))));

        Ok(())
    }

    #[test]
    fn unknown_slug_returns_none() {
        let catalog = InMemoryCatalog::new();

        assert!(catalog.product_by_slug("missing").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn set_price_overwrites_live_price() -> TestResult {
        let mut catalog = InMemoryCatalog::new();
        let key = catalog.insert(Product::new("Korma", "korma", Decimal::new(450, 0)))?;

        assert!(catalog.set_price(key, Decimal::new(475, 0)));
        assert_eq!(
            catalog.product(key).map(|p| p.price),
            Some(Decimal::new(475, 0))
        );

        Ok(())
    }

    #[test]
    fn set_price_unknown_key_returns_false() {
        let mut catalog = InMemoryCatalog::new();

        assert!(!catalog.set_price(ProductKey::default(), Decimal::ONE));
    }
}
