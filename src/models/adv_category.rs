//! Advertisement/category join entity
//!
//! Materializes the many-to-many relation between advertisements and
//! categories. The (advertisement_id, category_id) pair is unique and rows
//! are deleted together with either parent.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use super::adv_summary::Entity as AdvSummary;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adv_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub advertisement_id: i32,

    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::adv_summary::Entity",
        from = "Column::AdvertisementId",
        to = "super::adv_summary::Column::Id",
        on_delete = "Cascade"
    )]
    AdvSummary,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::adv_summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvSummary.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// String form of a link: the name of the linked advertisement.
    pub async fn display_name<C>(&self, db: &C) -> Result<String, DbErr>
    where
        C: ConnectionTrait,
    {
        let advertisement = self
            .find_related(AdvSummary)
            .one(db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "advertisement {} for category link {}",
                    self.advertisement_id, self.id
                ))
            })?;
        Ok(advertisement.name)
    }
}
