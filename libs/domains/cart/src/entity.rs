use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the cart_items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Anonymous browser session identifier
    pub session_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_products::entity::Entity",
        from = "Column::ProductId",
        to = "domain_products::entity::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<domain_products::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion to the domain CartItem; the embedded product is joined separately
impl From<Model> for crate::models::CartItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            product: None,
            quantity: model.quantity,
            session_id: model.session_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
