//! Migration to create the adv_categories join table.
//!
//! Each row links one advertisement to one category. Rows disappear with
//! either parent, and a pair may only be linked once.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdvCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdvCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdvCategories::AdvertisementId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdvCategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adv_categories_advertisement_id")
                            .from(AdvCategories::Table, AdvCategories::AdvertisementId)
                            .to(AdvSummaries::Table, AdvSummaries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adv_categories_category_id")
                            .from(AdvCategories::Table, AdvCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adv_categories_advertisement_category")
                    .table(AdvCategories::Table)
                    .col(AdvCategories::AdvertisementId)
                    .col(AdvCategories::CategoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adv_categories_category_id")
                    .table(AdvCategories::Table)
                    .col(AdvCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_adv_categories_category_id")
                    .table(AdvCategories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_adv_categories_advertisement_category")
                    .table(AdvCategories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AdvCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdvCategories {
    Table,
    Id,
    AdvertisementId,
    CategoryId,
}

#[derive(DeriveIden)]
enum AdvSummaries {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}
