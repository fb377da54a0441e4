use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    pub original_price: Option<i64>,
    /// Public image path; unique so the seeder can upsert on it
    #[sea_orm(unique)]
    pub image: Option<String>,
    pub category: String,
    pub condition: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    /// Opaque pgvector text literal; never exposed through the API
    #[sea_orm(column_type = "Text", nullable)]
    pub embedding: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product; drops the embedding
impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            original_price: model.original_price,
            image: model.image,
            category: model.category,
            condition: model.condition,
            description: model.description,
            size: model.size,
            brand: model.brand,
            color: model.color,
            material: model.material,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain CreateProduct to Sea-ORM ActiveModel
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        let now = chrono::Utc::now();

        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            original_price: Set(input.original_price),
            image: Set(input.image),
            category: Set(input.category),
            condition: Set(input.condition),
            description: Set(input.description),
            size: Set(input.size),
            brand: Set(input.brand),
            color: Set(input.color),
            material: Set(input.material),
            embedding: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
