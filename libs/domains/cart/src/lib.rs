//! Cart Domain
//!
//! Session-scoped shopping carts over the product catalog. Each line pairs
//! a session with a product; adding a product a session already has merges
//! quantities, and setting a quantity at or below zero removes the line.
//!
//! Deleting a product cascades to its cart lines at the database level.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CartError, CartResult};
pub use models::{AddToCart, CartItem, UpdateCartItem};
pub use postgres::PgCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use service::{CartService, QuantityUpdate};
