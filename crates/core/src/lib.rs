//! Goblin Store Core - Domain types and cart state.
//!
//! This crate provides the pieces shared by every Goblin Store component:
//! - `storefront` - Server-rendered shop (catalog, cart, checkout)
//! - `cli` - Command-line tools for inspecting persisted state
//!
//! # Architecture
//!
//! The core crate contains types, the storage trait and the cart state
//! module. It performs no network I/O; durable storage backends that touch
//! the filesystem live in the storefront crate and plug in through
//! [`KeyValueStore`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices, emails, IDs and catalog values
//! - [`storage`] - Synchronous string-keyed store trait and in-memory store
//! - [`cart`] - Write-through cart state mirrored to a [`KeyValueStore`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartError, PRODUCTS_KEY};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
