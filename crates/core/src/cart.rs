//! Cart state mirrored to a [`KeyValueStore`].
//!
//! A [`Cart`] owns the ordered list of products the shopper has selected.
//! The list is hydrated once from the store key [`PRODUCTS_KEY`] and every
//! mutation writes the full list back as JSON before returning, so the
//! in-memory list and the stored value agree after each successful call.
//!
//! The store is never read again after hydration. Queries such as
//! [`Cart::total_price`] only look at the in-memory list.
//!
//! # Example
//!
//! ```
//! use goblin_store_core::{Cart, KeyValueStore, MemoryStore, Price, Product, PRODUCTS_KEY};
//!
//! let store = MemoryStore::new();
//! let mut cart = Cart::hydrate(store.clone());
//!
//! let potion = Product::new("Potion", Price::whole(21), "/potion.png");
//! cart.add_to_cart(potion.clone())?;
//! cart.add_to_cart(potion.clone())?;
//! assert_eq!(cart.total_price(), Price::whole(42));
//!
//! cart.remove_from_cart(&potion)?;
//! assert_eq!(cart.products(), &[potion]);
//! assert_eq!(
//!     store.get(PRODUCTS_KEY)?.as_deref(),
//!     Some(r#"[{"name":"Potion","price":21,"image":"/potion.png"}]"#)
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};
use crate::types::{Price, Product};

/// Store key holding the JSON-encoded cart.
pub const PRODUCTS_KEY: &str = "products";

/// Errors returned by cart mutations.
///
/// The in-memory list is updated before the store write is attempted, so
/// on error the cart still reflects the mutation; only the stored copy is
/// stale.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product list could not be encoded as JSON.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store rejected the write.
    #[error("failed to persist cart: {0}")]
    Persist(#[from] StorageError),
}

/// The shopper's cart.
///
/// Products are kept in insertion order and may repeat; each repeat is one
/// more unit of that product.
#[derive(Debug)]
pub struct Cart<S> {
    products: Vec<Product>,
    store: S,
}

impl<S: KeyValueStore> Cart<S> {
    /// Load the cart from `store`.
    ///
    /// A missing key, an unreadable store, or a value that does not decode
    /// as a list of products all yield an empty cart. Hydration never writes.
    pub fn hydrate(store: S) -> Self {
        let products = match store.get(PRODUCTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Product>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable persisted cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Cart store unavailable, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = products.len(), "Cart hydrated");
        Self { products, store }
    }

    /// Products currently in the cart, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of entries, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the cart holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether at least one entry equals `product`.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        self.products.contains(product)
    }

    /// Sum of the prices of every entry, repeats included.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.products.iter().map(|p| &p.price).sum()
    }

    /// Append `product` to the end of the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart could not be persisted.
    pub fn add_to_cart(&mut self, product: Product) -> Result<(), CartError> {
        self.products.push(product);
        self.persist()
    }

    /// Remove the first entry equal to `product` and persist.
    ///
    /// Only one unit is removed when the product appears several times.
    /// The cart is persisted even when nothing matched. Returns whether an
    /// entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the updated cart could not be persisted.
    pub fn remove_from_cart(&mut self, product: &Product) -> Result<bool, CartError> {
        let removed = self
            .products
            .iter()
            .position(|p| p == product)
            .map(|index| self.products.remove(index))
            .is_some();
        self.persist()?;
        Ok(removed)
    }

    /// Empty the cart and persist. Writes even if already empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the empty cart could not be persisted.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.products.clear();
        self.persist()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cart, returning its backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let encoded = serde_json::to_string(&self.products)?;
        self.store.set(PRODUCTS_KEY, &encoded)?;
        Ok(())
    }
}
