//! Orders
//!
//! Durable order records and the store seam checkout persists through. The
//! store hands out a scoped transaction; dropping it uncommitted rolls back
//! everything staged inside it.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{coupons::CouponKey, products::ProductKey};

new_key_type! {
    /// Order Key
    pub struct OrderKey;
}

/// Errors raised by order persistence.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// Items were written against an order the transaction did not create.
    #[error("order not found")]
    OrderNotFound,

    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Order lifecycle states.
///
/// Transitions run Pending → Confirmed → Dispatched → Delivered, with
/// Cancelled reachable from any non-terminal state. The cart subsystem only
/// ever creates Pending orders; transitions belong to order management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order created, awaiting confirmation
    Pending,
    /// Order confirmed
    Confirmed,
    /// Order handed to delivery
    Dispatched,
    /// Order delivered (terminal)
    Delivered,
    /// Order cancelled (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Whether this status permits a transition to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Dispatched)
                | (Self::Dispatched, Self::Delivered)
                | (
                    Self::Pending | Self::Confirmed | Self::Dispatched,
                    Self::Cancelled
                )
        )
    }
}

/// Customer-supplied shipping details collected at checkout.
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    /// Customer name
    pub customer_name: String,

    /// Contact phone number
    pub phone_number: String,

    /// Delivery address
    pub delivery_address: String,

    /// Delivery city
    pub city: String,

    /// Free-text notes, optional
    pub order_notes: String,
}

/// Order
#[derive(Debug, Clone)]
pub struct Order {
    /// Customer details as submitted at checkout
    pub customer: CustomerDetails,

    /// Final payable amount, after any discount
    pub total_amount: Decimal,

    /// Lifecycle status
    pub status: OrderStatus,

    /// The coupon used, if one was applied and still resolvable
    pub coupon: Option<CouponKey>,

    /// Creation time
    pub created_at: Timestamp,

    /// Last update time
    pub updated_at: Timestamp,
}

/// Fields for a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Customer details
    pub customer: CustomerDetails,

    /// Final payable amount
    pub total_amount: Decimal,

    /// Coupon reference, if any
    pub coupon: Option<CouponKey>,

    /// Creation time
    pub created_at: Timestamp,
}

/// One product line of a persisted order.
///
/// The price is copied verbatim from the cart line's snapshot, never re-read
/// from the live catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// The ordered product
    pub product: ProductKey,

    /// Unit price snapshot carried over from the cart
    pub price: Decimal,

    /// Number of units
    pub quantity: u32,
}

impl OrderItem {
    /// The cost of this item, `price × quantity`.
    pub fn cost(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A scoped transaction over an order store.
///
/// Everything created through the transaction becomes durable on `commit`.
/// Dropping it uncommitted discards all staged records.
pub trait OrderTransaction {
    /// Persist a new order and return its key.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderStoreError`] if the store rejects the write.
    fn create_order(&mut self, order: NewOrder) -> Result<OrderKey, OrderStoreError>;

    /// Persist the items of an order created in this transaction.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::OrderNotFound`] if `order` was not created
    /// in this transaction, or another [`OrderStoreError`] on write failure.
    fn create_order_items(
        &mut self,
        order: OrderKey,
        items: &[OrderItem],
    ) -> Result<(), OrderStoreError>;

    /// Commit everything staged in this transaction.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderStoreError`] if the commit fails; nothing staged
    /// becomes durable in that case.
    fn commit(self: Box<Self>) -> Result<(), OrderStoreError>;
}

/// Write access to durable order records.
pub trait OrderStore {
    /// Begin a scoped transaction.
    fn begin(&mut self) -> Box<dyn OrderTransaction + '_>;

    /// Look up a persisted order.
    fn order(&self, key: OrderKey) -> Option<&Order>;

    /// The items of a persisted order, in cart insertion order.
    fn order_items(&self, key: OrderKey) -> &[OrderItem];

    /// Number of persisted orders.
    fn len(&self) -> usize;

    /// Check whether no orders have been persisted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct InMemoryOrders {
    orders: SlotMap<OrderKey, Order>,
    items: FxHashMap<OrderKey, Vec<OrderItem>>,
}

impl InMemoryOrders {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrders {
    fn begin(&mut self) -> Box<dyn OrderTransaction + '_> {
        Box::new(InMemoryOrderTx {
            store: self,
            created: None,
            committed: false,
        })
    }

    fn order(&self, key: OrderKey) -> Option<&Order> {
        self.orders.get(key)
    }

    fn order_items(&self, key: OrderKey) -> &[OrderItem] {
        self.items.get(&key).map_or(&[], Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.orders.len()
    }
}

/// Transaction over [`InMemoryOrders`].
///
/// Rows are written eagerly so keys are stable, and removed again on drop if
/// the transaction was never committed.
#[derive(Debug)]
struct InMemoryOrderTx<'a> {
    store: &'a mut InMemoryOrders,
    created: Option<OrderKey>,
    committed: bool,
}

impl OrderTransaction for InMemoryOrderTx<'_> {
    fn create_order(&mut self, order: NewOrder) -> Result<OrderKey, OrderStoreError> {
        let key = self.store.orders.insert(Order {
            customer: order.customer,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            coupon: order.coupon,
            created_at: order.created_at,
            updated_at: order.created_at,
        });

        self.created = Some(key);

        Ok(key)
    }

    fn create_order_items(
        &mut self,
        order: OrderKey,
        items: &[OrderItem],
    ) -> Result<(), OrderStoreError> {
        if self.created != Some(order) {
            return Err(OrderStoreError::OrderNotFound);
        }

        self.store.items.insert(order, items.to_vec());

        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<(), OrderStoreError> {
        self.committed = true;

        Ok(())
    }
}

impl Drop for InMemoryOrderTx<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        if let Some(key) = self.created.take() {
            self.store.orders.remove(key);
            self.store.items.remove(&key);
        }
    }
}
