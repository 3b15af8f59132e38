//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (redirects to /)
//! POST /cart/remove            - Remove one unit (redirects to /cart)
//! POST /cart/clear             - Empty the cart (redirects to /cart)
//!
//! # Checkout
//! GET  /checkout               - Checkout list and customer form
//! POST /checkout               - Place order (redirects to /order)
//! GET  /order                  - Order summary
//!
//! # Anything else
//! *                            - "Page not found" (404)
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod not_found;
pub mod order;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory of the stylesheet and other static assets.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout and order summary
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/order", get(order::summary))
        .route("/health", get(health))
        .fallback(not_found::not_found)
}

/// Assemble the storefront application with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
