use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use domain_products::repository::{InMemoryProductRepository, ProductRepository};

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem};

/// Repository trait for cart persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// List a session's cart lines, newest first, each with its product embedded
    async fn list_by_session(&self, session_id: &str) -> CartResult<Vec<CartItem>>;

    /// Add a product to a cart, merging quantities when the session
    /// already has a line for it. The quantity must be positive.
    async fn add(&self, input: AddToCart) -> CartResult<CartItem>;

    /// Set a cart line's quantity. The quantity must be positive;
    /// removal of a line goes through `remove`.
    async fn set_quantity(&self, id: i32, quantity: i32) -> CartResult<CartItem>;

    /// Remove a cart line by id; returns whether a row was removed
    async fn remove(&self, id: i32) -> CartResult<bool>;
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<i32, CartItem>,
    next_id: i32,
}

/// In-memory implementation of CartRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartRepository {
    inner: Arc<RwLock<Inner>>,
    products: Option<InMemoryProductRepository>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire up a product store so listings embed products and adds
    /// verify the product exists
    pub fn with_products(products: InMemoryProductRepository) -> Self {
        Self {
            inner: Arc::default(),
            products: Some(products),
        }
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn list_by_session(&self, session_id: &str) -> CartResult<Vec<CartItem>> {
        let inner = self.inner.read().await;

        let mut items: Vec<CartItem> = inner
            .items
            .values()
            .filter(|item| item.session_id == session_id)
            .cloned()
            .collect();

        // Newest first; id breaks ties for rows created within one tick
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        drop(inner);

        if let Some(products) = &self.products {
            for item in &mut items {
                item.product = products
                    .get_by_id(item.product_id)
                    .await
                    .map_err(|e| CartError::Internal(e.to_string()))?;
            }
        }

        Ok(items)
    }

    async fn add(&self, input: AddToCart) -> CartResult<CartItem> {
        if let Some(products) = &self.products {
            let exists = products
                .get_by_id(input.product_id)
                .await
                .map_err(|e| CartError::Internal(e.to_string()))?
                .is_some();
            if !exists {
                return Err(CartError::ProductNotFound(input.product_id));
            }
        }

        let mut inner = self.inner.write().await;

        let existing_id = inner
            .items
            .values()
            .find(|item| {
                item.session_id == input.session_id && item.product_id == input.product_id
            })
            .map(|item| item.id);

        let item = match existing_id {
            Some(id) => {
                // Merge into the existing line
                let item = inner.items.get_mut(&id).expect("id came from the map");
                item.quantity += input.quantity;
                item.updated_at = chrono::Utc::now();
                tracing::info!(cart_item_id = id, "Merged cart item quantity");
                item.clone()
            }
            None => {
                inner.next_id += 1;
                let now = chrono::Utc::now();
                let item = CartItem {
                    id: inner.next_id,
                    product_id: input.product_id,
                    product: None,
                    quantity: input.quantity,
                    session_id: input.session_id,
                    created_at: now,
                    updated_at: now,
                };
                inner.items.insert(item.id, item.clone());
                tracing::info!(cart_item_id = item.id, "Added cart item");
                item
            }
        };

        Ok(item)
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> CartResult<CartItem> {
        let mut inner = self.inner.write().await;

        let item = inner.items.get_mut(&id).ok_or(CartError::NotFound(id))?;
        item.quantity = quantity;
        item.updated_at = chrono::Utc::now();

        tracing::info!(cart_item_id = id, quantity, "Updated cart item quantity");
        Ok(item.clone())
    }

    async fn remove(&self, id: i32) -> CartResult<bool> {
        let mut inner = self.inner.write().await;

        if inner.items.remove(&id).is_some() {
            tracing::info!(cart_item_id = id, "Removed cart item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::CreateProduct;

    fn sample_product(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 525000,
            original_price: Some(1200000),
            image: None,
            category: "dresses".to_string(),
            condition: "Excellent".to_string(),
            description: "Dress cantik dengan motif bunga".to_string(),
            size: Some("S".to_string()),
            brand: Some("Zara".to_string()),
            color: Some("floral".to_string()),
            material: Some("polyester".to_string()),
        }
    }

    async fn repo_with_product() -> (InMemoryCartRepository, i32) {
        let products = InMemoryProductRepository::new();
        let product = products.create(sample_product("Dress")).await.unwrap();
        (InMemoryCartRepository::with_products(products), product.id)
    }

    #[tokio::test]
    async fn test_add_creates_line_for_new_product() {
        let (repo, product_id) = repo_with_product().await;

        let item = repo
            .add(AddToCart {
                product_id,
                quantity: 2,
                session_id: "s1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(item.product_id, product_id);
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_add_merges_quantities_for_same_session_and_product() {
        let (repo, product_id) = repo_with_product().await;

        let first = repo
            .add(AddToCart {
                product_id,
                quantity: 2,
                session_id: "s1".to_string(),
            })
            .await
            .unwrap();

        let merged = repo
            .add(AddToCart {
                product_id,
                quantity: 3,
                session_id: "s1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 5);
        assert_eq!(repo.list_by_session("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_keeps_sessions_separate() {
        let (repo, product_id) = repo_with_product().await;

        for session in ["s1", "s2"] {
            repo.add(AddToCart {
                product_id,
                quantity: 1,
                session_id: session.to_string(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.list_by_session("s1").await.unwrap().len(), 1);
        assert_eq!(repo.list_by_session("s2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_missing_product() {
        let (repo, _) = repo_with_product().await;

        let result = repo
            .add(AddToCart {
                product_id: 999,
                quantity: 1,
                session_id: "s1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CartError::ProductNotFound(999))));
    }

    #[tokio::test]
    async fn test_list_embeds_product() {
        let (repo, product_id) = repo_with_product().await;

        repo.add(AddToCart {
            product_id,
            quantity: 1,
            session_id: "s1".to_string(),
        })
        .await
        .unwrap();

        let items = repo.list_by_session("s1").await.unwrap();
        let product = items[0].product.as_ref().expect("product embedded");
        assert_eq!(product.id, product_id);
        assert_eq!(product.name, "Dress");
    }

    #[tokio::test]
    async fn test_set_quantity_and_remove() {
        let (repo, product_id) = repo_with_product().await;

        let item = repo
            .add(AddToCart {
                product_id,
                quantity: 1,
                session_id: "s1".to_string(),
            })
            .await
            .unwrap();

        let updated = repo.set_quantity(item.id, 4).await.unwrap();
        assert_eq!(updated.quantity, 4);

        assert!(repo.remove(item.id).await.unwrap());
        assert!(!repo.remove(item.id).await.unwrap());

        let result = repo.set_quantity(item.id, 1).await;
        assert!(matches!(result, Err(CartError::NotFound(_))));
    }
}
