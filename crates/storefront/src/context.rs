//! Shared cart handle for request handlers.
//!
//! One [`CartContext`] is built when the storefront starts and lives in
//! [`AppState`](crate::state::AppState). Handlers receive clones of it; all
//! clones point at the same [`Cart`], so a mutation made while handling one
//! request is visible to every later read.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use goblin_store_core::{Cart, CartError, KeyValueStore, Price, Product};

type SharedCart = Cart<Box<dyn KeyValueStore>>;

/// A consistent view of the cart at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub products: Vec<Product>,
    pub total: Price,
}

impl CartSnapshot {
    /// Whether at least one entry equals `product`.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        self.products.contains(product)
    }
}

/// Cheaply cloneable handle to the session's single cart.
#[derive(Clone)]
pub struct CartContext {
    cart: Arc<Mutex<SharedCart>>,
}

impl fmt::Debug for CartContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartContext")
            .field("products", &self.lock().len())
            .finish()
    }
}

impl CartContext {
    /// Hydrate a cart from `store` and wrap it for sharing.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        Self {
            cart: Arc::new(Mutex::new(Cart::hydrate(store))),
        }
    }

    /// Products and total read under one lock.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        let cart = self.lock();
        CartSnapshot {
            products: cart.products().to_vec(),
            total: cart.total_price(),
        }
    }

    /// Products currently in the cart.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products().to_vec()
    }

    /// Sum of all entry prices.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lock().total_price()
    }

    /// Number of entries, counting repeats.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Whether at least one entry equals `product`.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        self.lock().contains(product)
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart could not be persisted. The product
    /// is still in the cart.
    pub fn add_to_cart(&self, product: Product) -> Result<(), CartError> {
        let name = product.name.clone();
        let mut cart = self.lock();
        cart.add_to_cart(product).inspect_err(|e| {
            tracing::error!(product = %name, error = %e, "Failed to persist cart after add");
        })?;
        tracing::info!(product = %name, count = cart.len(), "Added to cart");
        Ok(())
    }

    /// Remove one unit of `product`. Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart could not be persisted.
    pub fn remove_from_cart(&self, product: &Product) -> Result<bool, CartError> {
        let mut cart = self.lock();
        let removed = cart.remove_from_cart(product).inspect_err(|e| {
            tracing::error!(product = %product.name, error = %e, "Failed to persist cart after remove");
        })?;
        if removed {
            tracing::info!(product = %product.name, count = cart.len(), "Removed from cart");
        } else {
            tracing::debug!(product = %product.name, "Product not in cart");
        }
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the empty cart could not be persisted.
    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.lock().clear_cart().inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist cleared cart");
        })?;
        tracing::info!("Cart cleared");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SharedCart> {
        // Every cart operation finishes within one call, so a poisoned cart
        // is still consistent.
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
