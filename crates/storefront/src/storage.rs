//! File-backed persistent store.
//!
//! Each key is one file, `<root>/<key>.json`. Writes go to a temporary
//! sibling first and are renamed into place, so a crash mid-write leaves
//! the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use goblin_store_core::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] that survives process restarts.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the store's files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use goblin_store_core::{Cart, PRODUCTS_KEY, Price, Product};

    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("store");
        let store = FileStore::open(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get(PRODUCTS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set(PRODUCTS_KEY, "[]").unwrap();
        assert_eq!(store.get(PRODUCTS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("products.json").is_file());
        assert!(!dir.path().join(".products.json.tmp").exists());

        store.remove(PRODUCTS_KEY).unwrap();
        store.remove(PRODUCTS_KEY).unwrap();
        assert!(store.get(PRODUCTS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let product = Product::new("Goblin lantern", Price::whole(21), "/lantern.png");

        let mut cart = Cart::hydrate(FileStore::open(dir.path()).unwrap());
        cart.add_to_cart(product.clone()).unwrap();
        cart.add_to_cart(product.clone()).unwrap();
        drop(cart);

        let reopened = Cart::hydrate(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.products(), &[product.clone(), product]);
        assert_eq!(reopened.total_price(), Price::whole(42));
    }
}
