use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products, newest first
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Get a product by id
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product with validation
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Partially update a product
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// Upsert a product keyed on its image path, storing the embedding.
    ///
    /// Used by the catalog seeder; a re-run refreshes only the embedding
    /// and `updated_at` of an existing row.
    pub async fn upsert_product_by_image(
        &self,
        input: CreateProduct,
        embedding: String,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if input.image.is_none() {
            return Err(ProductError::Validation(
                "image is required for upsert".to_string(),
            ));
        }

        self.repository.upsert_by_image(input, embedding).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn sample_create() -> CreateProduct {
        CreateProduct {
            name: "Blazer Wol".to_string(),
            price: 825000,
            original_price: Some(2250000),
            image: Some("/images/frame_2-30.jpg".to_string()),
            category: "jackets".to_string(),
            condition: "Good".to_string(),
            description: "Blazer wol profesional, cocok untuk keperluan kantor".to_string(),
            size: Some("M".to_string()),
            brand: Some("Brooks Brothers".to_string()),
            color: Some("navy".to_string()),
            material: Some("wool".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_repository() {
        // No expectations set: repository must not be called
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let mut input = sample_create();
        input.name = String::new();

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_delegates_valid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(1, input)));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(sample_create()).await.unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Blazer Wol");
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_maps_missing_row_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(7).await;

        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_upsert_requires_image() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let mut input = sample_create();
        input.image = None;

        let result = service
            .upsert_product_by_image(input, "[0.1]".to_string())
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }
}
