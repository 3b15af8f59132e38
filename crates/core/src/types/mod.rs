//! Core types for Goblin Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{MAX_AMOUNT, Price, PriceError};
pub use product::{Category, Product};
