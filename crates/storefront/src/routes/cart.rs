//! Cart route handlers.
//!
//! Cart changes are plain HTML form posts answered with a redirect, so a
//! reload never repeats the action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use goblin_store_core::{Price, Product};
use serde::Deserialize;
use tracing::instrument;

use crate::context::CartSnapshot;
use crate::error::{self, AppError};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub name: String,
    /// Display price, e.g. `55 Zm`.
    pub price: String,
    /// Price as posted back by forms, e.g. `55`.
    pub price_value: String,
    pub image: String,
    pub in_cart: bool,
}

impl ProductView {
    /// Build the view of `product`, marking whether `cart` holds it.
    #[must_use]
    pub fn new(product: &Product, cart: &CartSnapshot) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            price_value: product.price.amount().normalize().to_string(),
            image: product.image.clone(),
            in_cart: cart.contains(product),
        }
    }

    /// Views of every entry in `cart`, repeats included.
    #[must_use]
    pub fn list(cart: &CartSnapshot) -> Vec<Self> {
        cart.products.iter().map(|p| Self::new(p, cart)).collect()
    }
}

/// A product identified by value in a form post.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image: String,
}

impl TryFrom<ProductForm> for Product {
    type Error = AppError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        let price = form
            .price
            .parse::<Price>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(Self::new(form.name, price, form.image))
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: usize,
    pub items: Vec<ProductView>,
    pub total: String,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().snapshot();

    CartShowTemplate {
        cart_count: cart.products.len(),
        items: ProductView::list(&cart),
        total: cart.total.to_string(),
    }
}

/// Add one unit of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> error::Result<Redirect> {
    let product = Product::try_from(form)?;
    error::add_breadcrumb("cart", "Added to cart", Some(&product.name));
    state.cart().add_to_cart(product)?;
    Ok(Redirect::to("/"))
}

/// Remove one unit of a product from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> error::Result<Redirect> {
    let product = Product::try_from(form)?;
    error::add_breadcrumb("cart", "Removed from cart", Some(&product.name));
    state.cart().remove_from_cart(&product)?;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> error::Result<Redirect> {
    error::add_breadcrumb("cart", "Cleared cart", None);
    state.cart().clear_cart()?;
    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(price: &str) -> ProductForm {
        ProductForm {
            name: "Product foo".to_string(),
            price: price.to_string(),
            image: "/test.jpg".to_string(),
        }
    }

    #[test]
    fn test_product_from_form() {
        let product = Product::try_from(form("55")).unwrap();
        assert_eq!(
            product,
            Product::new("Product foo", Price::whole(55), "/test.jpg")
        );
    }

    #[test]
    fn test_product_from_form_rejects_bad_price() {
        assert!(matches!(
            Product::try_from(form("cheap")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            Product::try_from(form("-1")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_product_view_round_trips_price() {
        let product = Product::new("Product foo", "12.50".parse().unwrap(), "/test.jpg");
        let cart = CartSnapshot {
            products: vec![product.clone()],
            total: product.price,
        };

        let view = ProductView::new(&product, &cart);

        assert_eq!(view.price, "12.5 Zm");
        assert_eq!(view.price_value, "12.5");
        assert!(view.in_cart);
        let posted = Product::try_from(ProductForm {
            name: view.name,
            price: view.price_value,
            image: view.image,
        })
        .unwrap();
        assert_eq!(posted, product);
    }
}
