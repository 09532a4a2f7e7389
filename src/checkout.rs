//! Checkout
//!
//! Converts a non-empty cart plus customer details into a durable order and
//! its items, then clears the cart. Persistence runs in one scoped
//! transaction: on any failure the order and its items roll back and the
//! cart is left untouched for a retry.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    cart::Cart,
    coupons::CouponStore,
    orders::{NewOrder, OrderItem, OrderKey, OrderStore, OrderStoreError},
};

pub use crate::orders::CustomerDetails;

/// Errors raised while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines. Callers redirect back to browsing rather than
    /// surfacing this as a failure.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A required customer field was missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The persistence transaction aborted; the cart is preserved for retry.
    #[error("checkout failed")]
    Failed(#[from] OrderStoreError),
}

/// Check that all required customer fields are present and non-blank.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingField`] naming the first missing field.
pub fn validate_details(details: &CustomerDetails) -> Result<(), CheckoutError> {
    let required = [
        ("customer_name", &details.customer_name),
        ("phone_number", &details.phone_number),
        ("delivery_address", &details.delivery_address),
        ("city", &details.city),
    ];

    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(name));
        }
    }

    Ok(())
}

/// Place an order from the cart's current contents.
///
/// The total is the cart's discounted total; each order item copies the
/// cart line's price snapshot verbatim. A coupon reference is recorded only
/// if the applied coupon still resolves; a stale one is dropped silently.
/// The cart is cleared only after the transaction commits.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] if the cart has no lines.
/// - [`CheckoutError::MissingField`] if a required detail is blank.
/// - [`CheckoutError::Failed`] if persistence aborts; the cart keeps its
///   lines and coupon so the caller can retry.
pub fn place_order<C, O>(
    cart: &mut Cart,
    details: &CustomerDetails,
    coupons: &C,
    orders: &mut O,
    now: Timestamp,
) -> Result<OrderKey, CheckoutError>
where
    C: CouponStore,
    O: OrderStore,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    validate_details(details)?;

    let total_amount = cart.total(coupons);
    let coupon = cart.resolve_coupon(coupons).map(|(key, _)| key);

    let items: Vec<OrderItem> = cart
        .lines()
        .iter()
        .map(|line| OrderItem {
            product: line.product,
            price: line.unit_price,
            quantity: line.quantity,
        })
        .collect();

    tracing::info!(lines = items.len(), %total_amount, "placing order");

    let key = {
        let mut tx = orders.begin();

        let key = tx.create_order(NewOrder {
            customer: details.clone(),
            total_amount,
            coupon,
            created_at: now,
        })?;

        tx.create_order_items(key, &items)?;
        tx.commit()?;

        key
    };

    cart.clear();

    tracing::info!("order placed and cart cleared");

    Ok(key)
}
