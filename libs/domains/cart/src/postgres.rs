use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ExprTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{CartError, CartResult},
    models::{AddToCart, CartItem},
    repository::CartRepository,
};

/// PostgreSQL implementation of CartRepository backed by SeaORM
#[derive(Clone)]
pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> CartError {
    CartError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn list_by_session(&self, session_id: &str) -> CartResult<Vec<CartItem>> {
        let rows = entity::Entity::find()
            .filter(entity::Column::SessionId.eq(session_id))
            .order_by_desc(entity::Column::CreatedAt)
            .find_also_related(domain_products::entity::Entity)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(rows
            .into_iter()
            .map(|(item, product)| {
                let item: CartItem = item.into();
                item.with_product(product.map(|p| p.into()))
            })
            .collect())
    }

    async fn add(&self, input: AddToCart) -> CartResult<CartItem> {
        let product_id = input.product_id;
        let now = chrono::Utc::now();

        let active = entity::ActiveModel {
            id: NotSet,
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            session_id: Set(input.session_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        // Single atomic statement so concurrent adds from the same session
        // merge instead of duplicating the line or losing an increment.
        let model = entity::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([entity::Column::SessionId, entity::Column::ProductId])
                    .value(
                        entity::Column::Quantity,
                        Expr::col((entity::Entity, entity::Column::Quantity)).add(input.quantity),
                    )
                    .value(entity::Column::UpdatedAt, Expr::current_timestamp())
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    CartError::ProductNotFound(product_id)
                }
                _ => internal(e),
            })?;

        tracing::info!(cart_item_id = model.id, product_id, "Added cart item");
        Ok(model.into())
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> CartResult<CartItem> {
        let active = entity::ActiveModel {
            id: Set(id),
            quantity: Set(quantity),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CartError::NotFound(id),
            other => internal(other),
        })?;

        tracing::info!(cart_item_id = id, quantity, "Updated cart item quantity");
        Ok(model.into())
    }

    async fn remove(&self, id: i32) -> CartResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(cart_item_id = id, "Removed cart item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
