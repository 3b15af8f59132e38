//! Integration tests for Goblin Store.
//!
//! Tests drive the assembled storefront router in-process, so no server or
//! network access is needed:
//!
//! ```bash
//! cargo test -p goblin-store-integration-tests
//! ```
//!
//! [`TestContext`] builds a fresh [`AppState`] per test with an in-memory
//! cart store that the test keeps a handle to.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use goblin_store_core::{Category, MemoryStore, Price, Product};
use goblin_store_storefront::{
    catalog::{Catalog, CatalogState},
    context::CartContext,
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// A storefront wired to an in-memory store.
pub struct TestContext {
    /// Shares entries with the cart's store.
    pub store: MemoryStore,
    pub state: AppState,
    app: Router,
}

/// The parts of a response tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestContext {
    /// Empty cart, catalog holding [`sample_catalog`].
    #[must_use]
    pub fn new() -> Self {
        Self::with(MemoryStore::new(), CatalogState::ready(sample_catalog()))
    }

    /// Cart hydrated from `store`, catalog fixed at `catalog`.
    #[must_use]
    pub fn with(store: MemoryStore, catalog: CatalogState) -> Self {
        let state = AppState::new(
            CartContext::new(store.clone()),
            Catalog::with_state(catalog),
        );
        let app = routes::app(state.clone());
        Self { store, state, app }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    /// POST `product` as a cart form to `path`.
    pub async fn post_product(&self, path: &str, product: &Product) -> TestResponse {
        let price = product.price.amount().normalize().to_string();
        self.post_form(
            path,
            &[
                ("name", product.name.as_str()),
                ("price", price.as_str()),
                ("image", product.image.as_str()),
            ],
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            location,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `Product foo`, priced at 55, shown with `/test.jpg`.
#[must_use]
pub fn product_foo() -> Product {
    Product::new("Product foo", Price::whole(55), "/test.jpg")
}

/// One category, "Category Foo", holding [`product_foo`].
#[must_use]
pub fn sample_catalog() -> Vec<Category> {
    vec![Category {
        name: "Category Foo".to_string(),
        items: vec![product_foo()],
    }]
}
