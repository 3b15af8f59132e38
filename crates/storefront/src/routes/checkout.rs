//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::context::CartSnapshot;
use crate::error;
use crate::models::{CheckoutForm, Order};
use crate::routes::cart::ProductView;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart_count: usize,
    pub items: Vec<ProductView>,
    pub total: String,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

impl CheckoutTemplate {
    fn new(cart: &CartSnapshot, form: CheckoutForm, error: Option<String>) -> Self {
        Self {
            cart_count: cart.products.len(),
            items: ProductView::list(cart),
            total: cart.total.to_string(),
            form,
            error,
        }
    }
}

/// Display the checkout list and customer form.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CheckoutTemplate::new(&state.cart().snapshot(), CheckoutForm::default(), None)
}

/// Place an order for the cart contents.
///
/// On success the order is recorded, the cart is emptied and the shopper is
/// sent to the order summary. Invalid input re-renders the form with a
/// message.
#[instrument(skip_all)]
pub async fn place_order(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> error::Result<Response> {
    let cart = state.cart().snapshot();

    let order = match Order::place(&form, cart.products.clone()) {
        Ok(order) => order,
        Err(e) => {
            tracing::info!(reason = %e, "Checkout rejected");
            let page = CheckoutTemplate::new(&cart, form, Some(e.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    tracing::info!(
        order_id = %order.id,
        items = order.products.len(),
        total = %order.total,
        "Order placed"
    );
    error::add_breadcrumb("checkout", "Placed order", None);

    state.record_order(order).await;
    state.cart().clear_cart()?;

    Ok(Redirect::to("/order").into_response())
}
