//! Cart
//!
//! Ephemeral, per-visitor collection of selected products with snapshotted
//! unit prices. The cart crosses the session boundary as a serialized value
//! (see [`crate::session`]) and never reads live catalog prices after a
//! product has been added.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    coupons::{Coupon, CouponKey, CouponStore},
    discounts,
    products::{Product, ProductKey},
};

/// Errors related to cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity was not a positive integer.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The coupon code did not resolve to an active, in-window coupon.
    #[error("invalid coupon code: {0}")]
    InvalidCoupon(String),
}

/// One product's entry in a cart.
///
/// The unit price is snapshotted when the product is first added and is
/// immutable thereafter; later catalog edits do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to
    pub product: ProductKey,

    /// Unit price captured at add time
    pub unit_price: Decimal,

    /// Number of units, always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// The line total, `unit_price × quantity`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart line resolved against the catalog for display.
#[derive(Debug)]
pub struct CartEntry<'a> {
    /// The product record
    pub product: &'a Product,

    /// The product key
    pub key: ProductKey,

    /// Snapshotted unit price
    pub unit_price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// `unit_price × quantity`
    pub line_total: Decimal,
}

/// Cart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
    coupon: Option<CouponKey>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the original price snapshot is kept. Otherwise a new line is appended
    /// with the product's current price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add(
        &mut self,
        key: ProductKey,
        product: &Product,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == key) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product: key,
                unit_price: product.price,
                quantity,
            });
        }

        Ok(())
    }

    /// Remove a product's line. A no-op if the product is not in the cart.
    pub fn remove(&mut self, key: ProductKey) {
        self.lines.retain(|line| line.product != key);
    }

    /// Overwrite a line's quantity, keeping its price snapshot.
    ///
    /// A quantity of zero removes the line. A no-op if the product is not in
    /// the cart.
    pub fn update(&mut self, key: ProductKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == key) {
            line.quantity = quantity;
        }
    }

    /// Number of distinct product lines.
    ///
    /// This counts lines, not units: a line with quantity 3 contributes 1.
    /// Checkout uses this to gate on emptiness.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The raw lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The applied coupon key, if any.
    pub fn coupon(&self) -> Option<CouponKey> {
        self.coupon
    }

    /// Resolve the lines against the catalog for display, in insertion order.
    ///
    /// Lines whose product no longer resolves are skipped here; totals are
    /// computed from the snapshotted lines alone and are unaffected.
    pub fn entries<'a, C: Catalog>(
        &'a self,
        catalog: &'a C,
    ) -> impl Iterator<Item = CartEntry<'a>> + 'a {
        self.lines.iter().filter_map(|line| {
            catalog.product(line.product).map(|product| CartEntry {
                product,
                key: line.product,
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
        })
    }

    /// The sum of all line totals, before any discount.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.line_total())
    }

    /// Apply a coupon by code.
    ///
    /// The code is matched case-insensitively against coupons that are active
    /// and whose validity window contains `now`. On success the coupon key is
    /// stored on the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidCoupon`] if no such coupon exists; any
    /// previously applied coupon is cleared, the lines are untouched.
    pub fn apply_coupon<S: CouponStore>(
        &mut self,
        code: &str,
        store: &S,
        now: Timestamp,
    ) -> Result<CouponKey, CartError> {
        match store.find_active(code, now) {
            Some((key, _)) => {
                tracing::info!(code, "coupon applied to cart");
                self.coupon = Some(key);

                Ok(key)
            }
            None => {
                tracing::info!(code, "coupon rejected");
                self.coupon = None;

                Err(CartError::InvalidCoupon(code.to_string()))
            }
        }
    }

    /// Resolve the applied coupon against the store.
    ///
    /// A coupon that was applied but has since been deleted is stale and
    /// yields `None`; callers treat that as "no coupon", never as an error.
    pub fn resolve_coupon<'a, S: CouponStore>(
        &self,
        store: &'a S,
    ) -> Option<(CouponKey, &'a Coupon)> {
        let key = self.coupon?;

        store.coupon(key).map(|coupon| (key, coupon))
    }

    /// The payable total after the applied coupon, if it still resolves.
    ///
    /// With no coupon, or a stale one, this equals [`Cart::subtotal`].
    pub fn total<S: CouponStore>(&self, store: &S) -> Decimal {
        let coupon = self.resolve_coupon(store).map(|(_, coupon)| coupon);

        discounts::payable_total(self.subtotal(), coupon)
    }

    /// Empty the cart and drop any applied coupon. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
    }
}
