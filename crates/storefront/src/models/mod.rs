//! Domain models for storefront.

pub mod order;

pub use order::{CheckoutForm, Order, OrderError};
