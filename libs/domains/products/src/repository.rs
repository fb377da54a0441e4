use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by id
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// List all products, newest first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Partially update an existing product
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by id; returns whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Atomically insert the product or, when a row with the same image
    /// already exists, refresh only its embedding and `updated_at`.
    ///
    /// The input must carry an image path; the embedding is an opaque
    /// pgvector text literal.
    async fn upsert_by_image(
        &self,
        input: CreateProduct,
        embedding: String,
    ) -> ProductResult<Product>;
}

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<i32, Product>,
    embeddings: HashMap<i32, String>,
    next_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a stored embedding (test helper; Postgres keeps these opaque)
    pub async fn embedding_of(&self, id: i32) -> Option<String> {
        self.inner.read().await.embeddings.get(&id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut inner = self.inner.write().await;

        inner.next_id += 1;
        let product = Product::new(inner.next_id, input);
        inner.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let inner = self.inner.read().await;

        let mut result: Vec<Product> = inner.products.values().cloned().collect();

        // Newest first; id breaks ties for rows created within one tick
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut inner = self.inner.write().await;

        let product = inner
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut inner = self.inner.write().await;

        if inner.products.remove(&id).is_some() {
            inner.embeddings.remove(&id);
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn upsert_by_image(
        &self,
        input: CreateProduct,
        embedding: String,
    ) -> ProductResult<Product> {
        let image = input
            .image
            .clone()
            .ok_or_else(|| ProductError::Validation("image is required for upsert".to_string()))?;

        let mut inner = self.inner.write().await;

        let existing_id = inner
            .products
            .values()
            .find(|p| p.image.as_deref() == Some(image.as_str()))
            .map(|p| p.id);

        let product = match existing_id {
            Some(id) => {
                // Existing row keeps its id and catalog fields
                let product = inner.products.get_mut(&id).expect("id came from the map");
                product.updated_at = chrono::Utc::now();
                let refreshed = product.clone();
                inner.embeddings.insert(id, embedding);
                tracing::info!(product_id = id, "Refreshed product embedding");
                refreshed
            }
            None => {
                inner.next_id += 1;
                let product = Product::new(inner.next_id, input);
                inner.products.insert(product.id, product.clone());
                inner.embeddings.insert(product.id, embedding);
                tracing::info!(product_id = product.id, "Created product via upsert");
                product
            }
        };

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create(name: &str, image: Option<&str>) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 420000,
            original_price: Some(975000),
            image: image.map(|s| s.to_string()),
            category: "pants".to_string(),
            condition: "Good".to_string(),
            description: "Celana chino khaki yang nyaman".to_string(),
            size: Some("34W x 30L".to_string()),
            brand: Some("Gap".to_string()),
            color: Some("khaki".to_string()),
            material: Some("cotton".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo
            .create(sample_create("Celana Chino Khaki", None))
            .await
            .unwrap();
        assert_eq!(product.name, "Celana Chino Khaki");
        assert!(product.id > 0);

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, product.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(sample_create("first", None)).await.unwrap();
        let second = repo.create(sample_create("second", None)).await.unwrap();
        let third = repo.create(sample_create("third", None)).await.unwrap();

        let listed = repo.list().await.unwrap();
        let ids: Vec<i32> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(999, UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(sample_create("doomed", None)).await.unwrap();
        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_by_image_requires_image() {
        let repo = InMemoryProductRepository::new();

        let result = repo
            .upsert_by_image(sample_create("no image", None), "[0.5]".to_string())
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_upsert_by_image_keeps_id_and_refreshes_embedding() {
        let repo = InMemoryProductRepository::new();
        let image = Some("/images/frame_3-20.jpg");

        let created = repo
            .upsert_by_image(sample_create("Celana Chino Khaki", image), "[1.0]".to_string())
            .await
            .unwrap();
        assert_eq!(repo.embedding_of(created.id).await.as_deref(), Some("[1.0]"));

        let refreshed = repo
            .upsert_by_image(sample_create("Renamed", image), "[2.0]".to_string())
            .await
            .unwrap();

        assert_eq!(refreshed.id, created.id);
        // Catalog fields survive; only the embedding changed
        assert_eq!(refreshed.name, "Celana Chino Khaki");
        assert_eq!(repo.embedding_of(created.id).await.as_deref(), Some("[2.0]"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
