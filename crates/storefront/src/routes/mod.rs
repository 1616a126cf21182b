//! HTTP route handlers for the cart widget.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product cards and cart sidebar
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart sidebar fragment
//! GET  /cart/items             - Cart rows fragment
//! POST /cart/add               - Add a listed product (returns sidebar, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns sidebar, triggers cart-updated)
//! POST /cart/remove            - Remove line (returns sidebar, triggers cart-updated)
//! POST /cart/toggle            - Open or close the sidebar
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Redirect to the messaging hand-off
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", get(cart::items))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/toggle", post(cart::toggle))
        .route("/count", get(cart::count))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .route("/checkout", get(cart::checkout))
        .nest("/cart", cart_routes())
}

/// Build the application with state, static files and request tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
