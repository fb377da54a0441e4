use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Name))
                    .col(big_integer(Products::Price))
                    .col(big_integer_null(Products::OriginalPrice))
                    .col(string_len_null(Products::Image, 500))
                    .col(string(Products::Category).default(""))
                    .col(string(Products::Condition).default(""))
                    .col(text(Products::Description).default(""))
                    .col(string_null(Products::Size))
                    .col(string_null(Products::Brand))
                    .col(string_null(Products::Color))
                    .col(string_null(Products::Material))
                    .col(text_null(Products::Embedding))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique image path is what the seeder upserts on
        manager
            .create_index(
                Index::create()
                    .name("idx_products_image")
                    .table(Products::Table)
                    .col(Products::Image)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_brand")
                    .table(Products::Table)
                    .col(Products::Brand)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_created_at")
                    .table(Products::Table)
                    .col(Products::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    OriginalPrice,
    Image,
    Category,
    Condition,
    Description,
    Size,
    Brand,
    Color,
    Material,
    Embedding,
    CreatedAt,
    UpdatedAt,
}
