//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use goblin_store_core::Category;
use tracing::instrument;

use crate::context::CartSnapshot;
use crate::routes::cart::ProductView;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub products: Vec<ProductView>,
}

impl CategoryView {
    fn new(category: &Category, cart: &CartSnapshot) -> Self {
        Self {
            name: category.name.clone(),
            products: category
                .items
                .iter()
                .map(|product| ProductView::new(product, cart))
                .collect(),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart_count: usize,
    pub is_loading: bool,
    pub error: bool,
    pub categories: Vec<CategoryView>,
}

/// Display the catalog.
///
/// Shows a loading message until the catalog has been fetched and an error
/// message if fetching failed.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().snapshot().await;
    let cart = state.cart().snapshot();

    HomeTemplate {
        cart_count: cart.products.len(),
        is_loading: catalog.is_loading,
        error: catalog.error,
        categories: catalog
            .categories
            .iter()
            .map(|category| CategoryView::new(category, &cart))
            .collect(),
    }
}
