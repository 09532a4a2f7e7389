//! Fixtures
//!
//! YAML-seeded store sets for demos and tests. A fixture set loads product
//! and coupon files of the same name into the in-memory stores, keeping
//! string-keyed lookups so callers can reference records by name.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    coupons::{CouponKey, InMemoryCoupons},
    products::{Product, ProductKey},
};

pub mod coupons;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Percentage outside 0–100
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(u8),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Catalog rejected a fixture product
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: InMemoryCatalog,
    coupons: InMemoryCoupons,

    /// String key -> store key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,
    coupon_keys: FxHashMap<String, CouponKey>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: InMemoryCatalog::new(),
            coupons: InMemoryCoupons::new(),
            product_keys: FxHashMap::default(),
            coupon_keys: FxHashMap::default(),
        }
    }

    /// Load products from a YAML fixture file into the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price does
    /// not parse, or a slug collides with an already-loaded product.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product: Product = product_fixture.try_into()?;
            let product_key = self.catalog.insert(product)?;

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load coupons from a YAML fixture file into the coupon store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// amount or percentage is invalid.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: coupons::CouponsFixture = serde_norway::from_str(&contents)?;

        for (key, coupon_fixture) in fixture.coupons {
            let coupon_key = self.coupons.insert(coupon_fixture.try_into()?);

            self.coupon_keys.insert(key, coupon_key);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products and coupons with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_coupons(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        let product_key = self.product_key(key)?;

        self.catalog
            .product(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product's store key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a coupon's store key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon_key(&self, key: &str) -> Result<CouponKey, FixtureError> {
        self.coupon_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::CouponNotFound(key.to_string()))
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    /// The loaded coupon store.
    pub fn coupons(&self) -> &InMemoryCoupons {
        &self.coupons
    }

    /// Take ownership of the loaded stores.
    pub fn into_stores(self) -> (InMemoryCatalog, InMemoryCoupons) {
        (self.catalog, self.coupons)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
