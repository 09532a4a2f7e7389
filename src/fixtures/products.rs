//! Product fixture schema

use std::str::FromStr;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// A `products/<name>.yml` file.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products keyed by fixture name
    pub products: FxHashMap<String, ProductFixture>,
}

/// One product entry.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Display name
    pub name: String,

    /// Unique slug
    pub slug: String,

    /// Price as a decimal string, e.g. `"450.00"`
    pub price: String,

    /// Availability flag, defaults to true
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Parse a fixture price string into a decimal amount.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal.
pub fn parse_price(price: &str) -> Result<Decimal, FixtureError> {
    Decimal::from_str(price.trim()).map_err(|_| FixtureError::InvalidPrice(price.to_string()))
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product {
            name: fixture.name,
            slug: fixture.slug,
            price,
            is_available: fixture.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_accepts_plain_decimals() -> TestResult {
        assert_eq!(parse_price("450.00")?, Decimal::new(450_00, 2));
        assert_eq!(parse_price(" 480 ")?, Decimal::new(480, 0));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_garbage() {
        assert!(matches!(
            parse_price("4,50"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }
}
