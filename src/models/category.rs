//! Category entity model
//!
//! Categories are named tags attached to advertisements through the
//! `adv_categories` join table.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelBehavior, Set};

/// Category entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name (required, max 255 characters)
    pub name: String,

    /// Set once when the row is inserted
    pub insert_date: Option<DateTimeWithTimeZone>,

    /// Refreshed on every save
    pub update_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::adv_category::Entity")]
    AdvCategory,
}

impl Related<super::adv_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvCategory.def()
    }
}

impl Related<super::adv_summary::Entity> for Entity {
    fn to() -> RelationDef {
        super::adv_category::Relation::AdvSummary.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::adv_category::Relation::Category.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert {
            self.insert_date = Set(Some(now));
        }
        self.update_date = Set(now);
        Ok(self)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
