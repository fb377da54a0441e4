use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository backed by SeaORM
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        // Sparse update: only provided fields are set; updated_at always is
        let mut active = entity::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(original_price) = input.original_price {
            active.original_price = Set(Some(original_price));
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(condition) = input.condition {
            active.condition = Set(condition);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(size) = input.size {
            active.size = Set(Some(size));
        }
        if let Some(brand) = input.brand {
            active.brand = Set(Some(brand));
        }
        if let Some(color) = input.color {
            active.color = Set(Some(color));
        }
        if let Some(material) = input.material {
            active.material = Set(Some(material));
        }

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => internal(other),
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
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
        if input.image.is_none() {
            return Err(ProductError::Validation(
                "image is required for upsert".to_string(),
            ));
        }

        let mut active: entity::ActiveModel = input.into();
        active.embedding = Set(Some(embedding));

        // Single atomic statement so concurrent seeder runs cannot race.
        // A conflicting row keeps its id and catalog fields; only the
        // embedding and updated_at take the incoming values.
        let model = entity::Entity::insert(active)
            .on_conflict(
                OnConflict::column(entity::Column::Image)
                    .update_columns([entity::Column::Embedding, entity::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(internal)?;

        tracing::info!(product_id = model.id, "Upserted product by image");
        Ok(model.into())
    }
}
