//! API routes module

pub mod health;

use axum::Router;
use domain_cart::{CartService, PgCartRepository};
use domain_products::{PgProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let product_service = ProductService::new(PgProductRepository::new(state.db.clone()));
    let cart_service = CartService::new(PgCartRepository::new(state.db.clone()));

    Router::new()
        .nest("/products", domain_products::handlers::router(product_service))
        .nest("/cart", domain_cart::handlers::router(cart_service))
}
