//! Zaikest prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartEntry, CartError, CartLine},
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::{CheckoutError, CustomerDetails, place_order, validate_details},
    coupons::{Coupon, CouponKey, CouponStore, InMemoryCoupons},
    discounts::{discount_for, payable_total},
    fixtures::{Fixture, FixtureError},
    orders::{
        InMemoryOrders, NewOrder, Order, OrderItem, OrderKey, OrderStatus, OrderStore,
        OrderStoreError, OrderTransaction,
    },
    products::{Product, ProductKey},
    receipt::Receipt,
    session::{InMemorySession, SessionError, SessionStore, load_cart, save_cart},
};
