//! Fallback for unknown paths.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use crate::state::AppState;

/// "Page not found" template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub cart_count: usize,
}

/// Render the not-found page with a 404 status.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");

    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            cart_count: state.cart().count(),
        },
    )
}
