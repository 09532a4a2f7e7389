//! Coupon fixture schema

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    coupons::Coupon,
    fixtures::{FixtureError, products::parse_price},
};

/// A `coupons/<name>.yml` file.
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Coupons keyed by fixture name
    pub coupons: FxHashMap<String, CouponFixture>,
}

/// One coupon entry.
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon code
    pub code: String,

    /// Flat discount as a decimal string
    pub discount_amount: String,

    /// Percentage discount, 0–100
    #[serde(default)]
    pub discount_percentage: u8,

    /// Minimum subtotal as a decimal string
    pub min_order_amount: String,

    /// Window start, RFC 3339
    pub valid_from: Timestamp,

    /// Window end, RFC 3339
    pub valid_to: Timestamp,

    /// Active flag, defaults to true
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<CouponFixture> for Coupon {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        if fixture.discount_percentage > 100 {
            return Err(FixtureError::InvalidPercentage(fixture.discount_percentage));
        }

        Ok(Coupon {
            code: fixture.code,
            discount_amount: parse_price(&fixture.discount_amount)?,
            discount_percentage: fixture.discount_percentage,
            min_order_amount: parse_price(&fixture.min_order_amount)?,
            valid_from: fixture.valid_from,
            valid_to: fixture.valid_to,
            active: fixture.active,
        })
    }
}
