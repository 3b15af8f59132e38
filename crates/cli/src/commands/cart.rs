//! Persisted cart commands.
//!
//! These open the same file-backed store the storefront uses. Run them while
//! the storefront is stopped: a running storefront keeps its own copy of the
//! cart in memory and overwrites the file on its next change.

use std::fmt::Write as _;
use std::path::Path;

use goblin_store_core::{Cart, KeyValueStore};
use goblin_store_storefront::storage::FileStore;

use super::CommandError;

/// Print the persisted cart.
///
/// # Errors
///
/// Returns an error if the store directory cannot be opened.
#[allow(clippy::print_stdout)]
pub fn show(data_dir: &Path) -> Result<(), CommandError> {
    let cart = Cart::hydrate(FileStore::open(data_dir)?);
    print!("{}", render(&cart));
    Ok(())
}

/// Empty the persisted cart.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
pub fn clear(data_dir: &Path) -> Result<(), CommandError> {
    let mut cart = Cart::hydrate(FileStore::open(data_dir)?);
    let removed = cart.len();
    cart.clear_cart()?;
    tracing::info!(removed, dir = %data_dir.display(), "Cart cleared");
    Ok(())
}

/// One line per entry followed by the total.
pub fn render<S: KeyValueStore>(cart: &Cart<S>) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for product in cart.products() {
        let _ = writeln!(out, "{}\t{}\t{}", product.name, product.price, product.image);
    }
    let _ = writeln!(out, "Total: {} ({} items)", cart.total_price(), cart.len());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use goblin_store_core::{MemoryStore, PRODUCTS_KEY, Price, Product};

    use super::*;

    #[test]
    fn test_render_empty() {
        let cart = Cart::hydrate(MemoryStore::new());
        assert_eq!(render(&cart), "Cart is empty\n");
    }

    #[test]
    fn test_render_lists_entries_and_total() {
        let mut cart = Cart::hydrate(MemoryStore::new());
        let lantern = Product::new("Goblin Lantern", Price::whole(21), "/lantern.png");
        cart.add_to_cart(lantern.clone()).unwrap();
        cart.add_to_cart(lantern).unwrap();

        assert_eq!(
            render(&cart),
            "Goblin Lantern\t21 Zm\t/lantern.png\n\
             Goblin Lantern\t21 Zm\t/lantern.png\n\
             Total: 42 Zm (2 items)\n"
        );
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = Cart::hydrate(FileStore::open(dir.path()).unwrap());
        cart.add_to_cart(Product::new("Swamp Tonic", Price::whole(7), "/tonic.png"))
            .unwrap();

        clear(dir.path()).unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get(PRODUCTS_KEY).unwrap().as_deref(), Some("[]"));
    }
}
