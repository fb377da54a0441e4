use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity - a single secondhand catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Selling price in minor currency units
    pub price: i64,
    /// Original retail price, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    /// Public image path (e.g., "/images/frame_1-30.jpg")
    pub image: Option<String>,
    /// Category slug (e.g., "pants", "dresses")
    pub category: String,
    /// Condition grade (e.g., "Good", "Excellent")
    pub condition: String,
    /// Free-form description
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub original_price: Option<i64>,
    #[validate(length(max = 500))]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub description: String,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
}

/// DTO for partially updating a product.
///
/// Absent fields are left untouched; `updated_at` refreshes on every update,
/// even an empty one.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub original_price: Option<i64>,
    #[validate(length(max = 500))]
    pub image: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
}

impl Product {
    /// Create a new product from a CreateProduct DTO with a store-assigned id
    pub fn new(id: i32, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            original_price: input.original_price,
            image: input.image,
            category: input.category,
            condition: input.condition,
            description: input.description,
            size: input.size,
            brand: input.brand,
            color: input.color,
            material: input.material,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a sparse update; always bumps `updated_at`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(original_price) = update.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(condition) = update.condition {
            self.condition = condition;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(size) = update.size {
            self.size = Some(size);
        }
        if let Some(brand) = update.brand {
            self.brand = Some(brand);
        }
        if let Some(color) = update.color {
            self.color = Some(color);
        }
        if let Some(material) = update.material {
            self.material = Some(material);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateProduct {
        CreateProduct {
            name: "Kaos Band Vintage".to_string(),
            price: 375000,
            original_price: Some(600000),
            image: Some("/images/frame_2-00.jpg".to_string()),
            category: "shirts".to_string(),
            condition: "Excellent".to_string(),
            description: "Kaos band vintage asli, lembut dan nyaman".to_string(),
            size: Some("L".to_string()),
            brand: Some("Hanes".to_string()),
            color: Some("black".to_string()),
            material: Some("cotton".to_string()),
        }
    }

    #[test]
    fn product_serializes_with_camel_case_fields() {
        let product = Product::new(1, sample_create());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["originalPrice"], 600000);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("original_price").is_none());
    }

    #[test]
    fn product_omits_absent_optional_fields() {
        let mut input = sample_create();
        input.original_price = None;
        input.size = None;
        input.brand = None;

        let product = Product::new(1, input);
        let json = serde_json::to_value(&product).unwrap();

        assert!(json.get("originalPrice").is_none());
        assert!(json.get("size").is_none());
        assert!(json.get("brand").is_none());
    }

    #[test]
    fn apply_update_touches_only_present_fields() {
        let mut product = Product::new(1, sample_create());
        let before = product.updated_at;

        product.apply_update(UpdateProduct {
            price: Some(350000),
            ..Default::default()
        });

        assert_eq!(product.price, 350000);
        assert_eq!(product.name, "Kaos Band Vintage");
        assert_eq!(product.condition, "Excellent");
        assert!(product.updated_at >= before);
    }

    #[test]
    fn empty_update_still_bumps_updated_at() {
        let mut product = Product::new(1, sample_create());
        let before = product.updated_at;

        product.apply_update(UpdateProduct::default());

        assert!(product.updated_at >= before);
        assert_eq!(product.price, 375000);
    }

    #[test]
    fn create_product_validation() {
        use validator::Validate;

        let valid = sample_create();
        assert!(valid.validate().is_ok());

        let mut empty_name = sample_create();
        empty_name.name = String::new();
        assert!(empty_name.validate().is_err());

        let mut negative_price = sample_create();
        negative_price.price = -1;
        assert!(negative_price.validate().is_err());
    }
}
