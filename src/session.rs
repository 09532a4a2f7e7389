//! Session
//!
//! The cart's persistence boundary. The cart itself is a plain value; this
//! module serializes it into an opaque per-visitor key-value store and
//! validates it again on the way back in. A missing or corrupt payload
//! degrades to an empty cart rather than an error.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cart::Cart;

/// The session key the serialized cart lives under.
pub const CART_KEY: &str = "cart";

/// Errors raised when writing a cart to the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The cart could not be serialized.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Opaque key-value persistence scoped to one visitor session.
///
/// If the hosting environment allows concurrent requests for one session,
/// writes are last-write-wins; that race is accepted here, not solved.
pub trait SessionStore {
    /// Read a value.
    fn read(&self, key: &str) -> Option<&str>;

    /// Write a value, replacing any existing one.
    fn write(&mut self, key: &str, value: String);

    /// Delete a value. A no-op if absent.
    fn delete(&mut self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct InMemorySession {
    values: FxHashMap<String, String>,
}

impl InMemorySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySession {
    fn read(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn write(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Load the visitor's cart from the session.
///
/// A session with no cart, or one whose payload fails to deserialize, yields
/// a fresh empty cart; the stored payload is never trusted blindly.
pub fn load_cart<S: SessionStore>(session: &S) -> Cart {
    let Some(payload) = session.read(CART_KEY) else {
        return Cart::new();
    };

    let cart: Cart = match serde_json::from_str(payload) {
        Ok(cart) => cart,
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable cart payload");
            return Cart::new();
        }
    };

    // A line with quantity 0 can never be produced by the cart itself;
    // treat such a payload like any other corrupt one.
    if cart.lines().iter().any(|line| line.quantity == 0) {
        tracing::warn!("discarding cart payload with zero-quantity line");
        return Cart::new();
    }

    cart
}

/// Persist the cart back into the session.
///
/// # Errors
///
/// Returns a [`SessionError`] if serialization fails.
pub fn save_cart<S: SessionStore>(session: &mut S, cart: &Cart) -> Result<(), SessionError> {
    let payload = serde_json::to_string(cart)?;
    session.write(CART_KEY, payload);

    Ok(())
}
