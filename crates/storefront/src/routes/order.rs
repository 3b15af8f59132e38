//! Order summary route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::context::CartSnapshot;
use crate::models::Order;
use crate::routes::cart::ProductView;
use crate::state::AppState;

/// Placed order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub address: String,
    pub items: Vec<ProductView>,
    pub total: String,
    pub placed_at: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let ordered = CartSnapshot {
            products: order.products.clone(),
            total: order.total,
        };

        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            email: order.email.to_string(),
            address: order.address.clone(),
            items: ProductView::list(&ordered),
            total: order.total.to_string(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Order summary template.
#[derive(Template, WebTemplate)]
#[template(path = "order/summary.html")]
pub struct OrderSummaryTemplate {
    pub cart_count: usize,
    pub order: Option<OrderView>,
}

/// Display the most recently placed order.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    let order = state.last_order().await;

    OrderSummaryTemplate {
        cart_count: state.cart().count(),
        order: order.as_ref().map(OrderView::from),
    }
}
