use std::sync::Arc;
use validator::Validate;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem};
use crate::repository::CartRepository;

/// Outcome of setting a cart line's quantity
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    Updated(CartItem),
    Removed,
}

/// Service layer for cart business logic
#[derive(Clone)]
pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List a session's cart, newest first, products embedded
    pub async fn list_cart(&self, session_id: &str) -> CartResult<Vec<CartItem>> {
        if session_id.is_empty() {
            return Err(CartError::Validation("sessionId is required".to_string()));
        }

        self.repository.list_by_session(session_id).await
    }

    /// Add a product to a cart, merging with an existing line.
    ///
    /// A non-positive requested quantity is treated as 1.
    pub async fn add_to_cart(&self, mut input: AddToCart) -> CartResult<CartItem> {
        input
            .validate()
            .map_err(|e| CartError::Validation(e.to_string()))?;

        if input.quantity <= 0 {
            input.quantity = 1;
        }

        self.repository.add(input).await
    }

    /// Set a cart line's quantity; a quantity at or below zero removes it
    pub async fn set_quantity(&self, id: i32, quantity: i32) -> CartResult<QuantityUpdate> {
        if quantity <= 0 {
            let removed = self.repository.remove(id).await?;
            if !removed {
                return Err(CartError::NotFound(id));
            }
            return Ok(QuantityUpdate::Removed);
        }

        let item = self.repository.set_quantity(id, quantity).await?;
        Ok(QuantityUpdate::Updated(item))
    }

    /// Remove a cart line
    pub async fn remove_from_cart(&self, id: i32) -> CartResult<()> {
        let removed = self.repository.remove(id).await?;

        if !removed {
            return Err(CartError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCartRepository;

    fn sample_add() -> AddToCart {
        AddToCart {
            product_id: 1,
            quantity: 2,
            session_id: "s1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_requires_session_id() {
        let mock_repo = MockCartRepository::new();
        let service = CartService::new(mock_repo);

        let result = service.list_cart("").await;
        assert!(matches!(result, Err(CartError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_normalizes_non_positive_quantity_to_one() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo
            .expect_add()
            .withf(|input| input.quantity == 1)
            .returning(|input| {
                let now = chrono::Utc::now();
                Ok(CartItem {
                    id: 1,
                    product_id: input.product_id,
                    product: None,
                    quantity: input.quantity,
                    session_id: input.session_id,
                    created_at: now,
                    updated_at: now,
                })
            });

        let service = CartService::new(mock_repo);

        let mut input = sample_add();
        input.quantity = 0;

        let item = service.add_to_cart(input).await.unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[tokio::test]
    async fn test_add_rejects_missing_session() {
        let mock_repo = MockCartRepository::new();
        let service = CartService::new(mock_repo);

        let mut input = sample_add();
        input.session_id = String::new();

        let result = service.add_to_cart(input).await;
        assert!(matches!(result, Err(CartError::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes_line() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo.expect_remove().returning(|_| Ok(true));

        let service = CartService::new(mock_repo);

        let outcome = service.set_quantity(5, 0).await.unwrap();
        assert_eq!(outcome, QuantityUpdate::Removed);
    }

    #[tokio::test]
    async fn test_set_quantity_zero_on_missing_line_is_not_found() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo.expect_remove().returning(|_| Ok(false));

        let service = CartService::new(mock_repo);

        let result = service.set_quantity(5, -1).await;
        assert!(matches!(result, Err(CartError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_not_found() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo.expect_remove().returning(|_| Ok(false));

        let service = CartService::new(mock_repo);

        let result = service.remove_from_cart(9).await;
        assert!(matches!(result, Err(CartError::NotFound(9))));
    }
}
