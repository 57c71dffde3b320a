//! Migration to create the adv_summaries table.
//!
//! Advertisements carry a unique guid, two optional unique slugs and an
//! owning user reference that is cleared when the user is deleted.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdvSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdvSummaries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdvSummaries::Guid)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AdvSummaries::UsernameId).integer().null())
                    .col(ColumnDef::new(AdvSummaries::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(AdvSummaries::AdvSlugName)
                            .string_len(50)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdvSummaries::BrandSlugName)
                            .string_len(50)
                            .null()
                            .unique_key(),
                    )
                    .col(budget_column(manager.get_database_backend()))
                    .col(
                        ColumnDef::new(AdvSummaries::MaxFeePerLike)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdvSummaries::ExpireDate).date().not_null())
                    .col(ColumnDef::new(AdvSummaries::AdvImage).string_len(100).null())
                    .col(ColumnDef::new(AdvSummaries::AdvDesc).string_len(255).null())
                    .col(ColumnDef::new(AdvSummaries::AdvMinFollower).integer().null())
                    .col(ColumnDef::new(AdvSummaries::AdvMaxFollower).integer().null())
                    .col(
                        ColumnDef::new(AdvSummaries::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AdvSummaries::CreateDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdvSummaries::PublishDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adv_summaries_username_id")
                            .from(AdvSummaries::Table, AdvSummaries::UsernameId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is ordered by publish date
        manager
            .create_index(
                Index::create()
                    .name("idx_adv_summaries_publish_date")
                    .table(AdvSummaries::Table)
                    .col(AdvSummaries::PublishDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adv_summaries_username_id")
                    .table(AdvSummaries::Table)
                    .col(AdvSummaries::UsernameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_adv_summaries_username_id")
                    .table(AdvSummaries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_adv_summaries_publish_date")
                    .table(AdvSummaries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AdvSummaries::Table).to_owned())
            .await
    }
}

/// SQLite caps decimal precision at 16 digits, so it stores budgets as
/// plain `real`; other backends keep `numeric(38, 2)`.
fn budget_column(backend: DbBackend) -> ColumnDef {
    let mut column = ColumnDef::new(AdvSummaries::Budget);
    match backend {
        DbBackend::Sqlite => column.decimal(),
        _ => column.decimal_len(38, 2),
    };
    column.not_null().to_owned()
}

#[derive(DeriveIden)]
enum AdvSummaries {
    Table,
    Id,
    Guid,
    UsernameId,
    Name,
    AdvSlugName,
    BrandSlugName,
    Budget,
    MaxFeePerLike,
    ExpireDate,
    AdvImage,
    AdvDesc,
    AdvMinFollower,
    AdvMaxFollower,
    IsApproved,
    CreateDate,
    PublishDate,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
