//! Zaikest
//!
//! Zaikest is the cart-and-checkout core of an online storefront: a
//! per-visitor cart with snapshotted prices, coupon-based discounting, and
//! an atomic checkout that materializes the cart into a durable order.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod session;
pub mod utils;
