//! User entity model
//!
//! Identity records are owned by the authentication subsystem. The entity is
//! mapped here so advertisements and brands can name their owner.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// User referenced by advertisements and brands
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Login name (unique)
    #[sea_orm(unique)]
    pub username: String,

    pub email: Option<String>,

    pub date_joined: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::adv_summary::Entity")]
    AdvSummary,
    #[sea_orm(has_one = "super::brand::Entity")]
    Brand,
}

impl Related<super::adv_summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvSummary.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}
