//! Checkout form and placed orders.
//!
//! Orders are not sent anywhere. A placed order is kept in memory so the
//! order summary page can show it.

use chrono::{DateTime, Utc};
use goblin_store_core::{Email, EmailError, OrderId, Price, Product};
use serde::Deserialize;
use thiserror::Error;

/// Reasons an order cannot be placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please enter your {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// An order placed from the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub email: Email,
    pub address: String,
    pub products: Vec<Product>,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Validate `form` and build an order for `products`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if there are no products, a required field is
    /// blank, or the email is malformed.
    pub fn place(form: &CheckoutForm, products: Vec<Product>) -> Result<Self, OrderError> {
        if products.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let customer_name = required(&form.name, "name")?;
        let address = required(&form.address, "shipping address")?;
        let email = Email::parse(&form.email)?;
        let total = products.iter().map(|p| &p.price).sum();

        Ok(Self {
            id: OrderId::generate(),
            customer_name,
            email,
            address,
            products,
            total,
            placed_at: Utc::now(),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, OrderError> {
    let value = value.trim();
    if value.is_empty() {
        Err(OrderError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}
