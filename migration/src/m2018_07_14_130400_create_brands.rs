//! Migration to create the brands table.
//!
//! Column set matches the brand table as first generated. `adv_slug_name`
//! and `adv_id` predate the current brand model, which does not map them;
//! they stay nullable so inserts through the model are unaffected.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Brands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Brands::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Brands::AdvSlugName)
                            .string_len(50)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Brands::InsertDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Brands::UpdateDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Brands::AdvId).integer().null())
                    .col(
                        ColumnDef::new(Brands::UsernameId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_brands_adv_id")
                            .from(Brands::Table, Brands::AdvId)
                            .to(AdvSummaries::Table, AdvSummaries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_brands_username_id")
                            .from(Brands::Table, Brands::UsernameId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    AdvSlugName,
    InsertDate,
    UpdateDate,
    AdvId,
    UsernameId,
}

#[derive(DeriveIden)]
enum AdvSummaries {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
