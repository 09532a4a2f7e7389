//! Coupons

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Coupon Key
    pub struct CouponKey;
}

/// Coupon
///
/// A named discount rule with a validity window. The flat amount and the
/// percentage are additive when both are configured.
#[derive(Debug, Clone)]
pub struct Coupon {
    /// Coupon code, matched case-insensitively
    pub code: String,

    /// Flat amount taken off the subtotal
    pub discount_amount: Decimal,

    /// Percentage of the subtotal taken off, 0–100
    pub discount_percentage: u8,

    /// Subtotal below which the coupon does not apply
    pub min_order_amount: Decimal,

    /// Start of the validity window (inclusive)
    pub valid_from: Timestamp,

    /// End of the validity window (inclusive)
    pub valid_to: Timestamp,

    /// Whether the coupon can currently be applied
    pub active: bool,
}

/// Read access to coupon records.
pub trait CouponStore {
    /// Look up a coupon by key.
    fn coupon(&self, key: CouponKey) -> Option<&Coupon>;

    /// Find a coupon by code, case-insensitively, that is active and whose
    /// validity window contains `now`.
    fn find_active(&self, code: &str, now: Timestamp) -> Option<(CouponKey, &Coupon)>;
}

/// In-memory coupon store.
#[derive(Debug, Default)]
pub struct InMemoryCoupons {
    coupons: SlotMap<CouponKey, Coupon>,
    codes: FxHashMap<String, CouponKey>,
}

impl InMemoryCoupons {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a coupon. A later coupon with the same code shadows an earlier
    /// one for code lookups; key lookups still resolve both.
    pub fn insert(&mut self, coupon: Coupon) -> CouponKey {
        let code = coupon.code.to_ascii_lowercase();
        let key = self.coupons.insert(coupon);
        self.codes.insert(code, key);

        key
    }

    /// Remove a coupon, e.g. to model deletion while a cart still holds its
    /// key.
    pub fn remove(&mut self, key: CouponKey) -> Option<Coupon> {
        let coupon = self.coupons.remove(key)?;
        self.codes.remove(&coupon.code.to_ascii_lowercase());

        Some(coupon)
    }
}

impl CouponStore for InMemoryCoupons {
    fn coupon(&self, key: CouponKey) -> Option<&Coupon> {
        self.coupons.get(key)
    }

    fn find_active(&self, code: &str, now: Timestamp) -> Option<(CouponKey, &Coupon)> {
        let key = *self.codes.get(&code.to_ascii_lowercase())?;
        let coupon = self.coupons.get(key)?;

        if coupon.active && coupon.valid_from <= now && now <= coupon.valid_to {
            Some((key, coupon))
        } else {
            None
        }
    }
}
