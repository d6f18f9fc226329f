//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (store reachable)
//!
//! # Products
//! GET    /products              - List (?max-price, ?includes, ?limit)
//! POST   /products              - Create
//! GET    /products/{id}         - Fetch one
//! PUT    /products/{id}         - Replace
//! DELETE /products/{id}         - Delete
//! ```

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::replace)
                .delete(products::delete),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
}
