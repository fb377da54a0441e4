use chrono::{DateTime, Utc};
use domain_products::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A cart line item, optionally carrying its product for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique identifier
    pub id: i32,
    /// Product this line refers to
    pub product_id: i32,
    /// Embedded product, populated when listing a session's cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub quantity: i32,
    /// Anonymous browser session identifier
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for adding a product to a cart.
///
/// A non-positive quantity is treated as 1; adding a product already in
/// the session's cart merges quantities instead of duplicating the line.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[serde(default)]
    pub quantity: i32,
    #[validate(length(min = 1, max = 255))]
    pub session_id: String,
}

/// DTO for setting a cart line's quantity.
///
/// A quantity at or below zero removes the line.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItem {
    pub quantity: i32,
}

impl CartItem {
    /// Attach the joined product to this line
    pub fn with_product(mut self, product: Option<Product>) -> Self {
        self.product = product;
        self
    }
}
