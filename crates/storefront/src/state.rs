//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::context::CartContext;
use crate::models::Order;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the one cart of the
/// running storefront, so every handler observes the same cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cart: CartContext,
    catalog: Catalog,
    last_order: RwLock<Option<Order>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `cart` - The session's cart
    /// * `catalog` - Catalog handle, possibly still loading
    #[must_use]
    pub fn new(cart: CartContext, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cart,
                catalog,
                last_order: RwLock::new(None),
            }),
        }
    }

    /// Get a reference to the shared cart.
    #[must_use]
    pub fn cart(&self) -> &CartContext {
        &self.inner.cart
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The most recently placed order, if any.
    pub async fn last_order(&self) -> Option<Order> {
        self.inner.last_order.read().await.clone()
    }

    /// Record `order` as the most recently placed order.
    pub async fn record_order(&self, order: Order) {
        *self.inner.last_order.write().await = Some(order);
    }
}
