//! CLI command implementations.

pub mod cart;
pub mod catalog;

use goblin_store_core::{CartError, StorageError};
use goblin_store_storefront::catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("store error: {0}")]
    Storage(#[from] StorageError),

    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
