//! Advertisement entity model
//!
//! This module contains the SeaORM entity for the `adv_summaries` table
//! together with the two behaviors advertisements carry themselves:
//! publishing and resolving their canonical URL.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone, Decimal};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use uuid::Uuid;

use crate::routes::{self, UrlError};

/// Directory (relative to the media root) that advertisement images are stored under
pub const ADV_IMAGE_UPLOAD_DIR: &str = "adv_image/";

/// Advertisement entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adv_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Globally unique token, generated on insert when not provided
    #[sea_orm(unique)]
    pub guid: String,

    /// Owning user; cleared when the user is deleted
    pub username_id: Option<i32>,

    pub name: String,

    #[sea_orm(unique)]
    pub adv_slug_name: Option<String>,

    #[sea_orm(unique)]
    pub brand_slug_name: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((38, 2)))")]
    pub budget: Decimal,

    pub max_fee_per_like: i32,

    pub expire_date: Date,

    /// Stored file path relative to the media root, e.g. `adv_image/banner.png`
    pub adv_image: Option<String>,

    pub adv_desc: Option<String>,

    pub adv_min_follower: Option<i32>,

    pub adv_max_follower: Option<i32>,

    pub is_approved: bool,

    pub create_date: DateTimeWithTimeZone,

    /// Empty until the advertisement is published
    pub publish_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UsernameId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::adv_category::Entity")]
    AdvCategory,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::adv_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvCategory.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::adv_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::adv_category::Relation::AdvSummary.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if self.guid.is_not_set() {
                self.guid = Set(Uuid::new_v4().to_string());
            }
            if self.create_date.is_not_set() {
                self.create_date = Set(Utc::now().into());
            }
            if self.is_approved.is_not_set() {
                self.is_approved = Set(false);
            }
        }
        Ok(self)
    }
}

impl Model {
    /// Stamps `publish_date` with the current time and persists the row.
    ///
    /// Publishing an already published advertisement overwrites the
    /// previous timestamp.
    pub async fn publish<C>(self, db: &C) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active: ActiveModel = self.into();
        active.publish_date = Set(Some(Utc::now().into()));
        active.update(db).await
    }

    /// Path of the publish view for this advertisement.
    ///
    /// Fails when the advertisement has no `adv_slug_name`.
    pub fn get_absolute_url(&self) -> Result<String, UrlError> {
        let slug = self
            .adv_slug_name
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .ok_or(UrlError::MissingSlug { pk: self.id })?;
        Ok(routes::advertisement_publish(slug, self.id))
    }

    /// Whether `publish` has been called at least once
    pub fn is_published(&self) -> bool {
        self.publish_date.is_some()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builds the stored path for an uploaded advertisement image.
///
/// Only the final path component of `file_name` is kept.
pub fn image_upload_path(file_name: &str) -> Option<String> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")?;
    Some(format!("{ADV_IMAGE_UPLOAD_DIR}{base}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(slug: Option<&str>) -> Model {
        Model {
            id: 7,
            guid: "6f1c1a0e-5b43-4c4e-9d36-9f1f2f7c6a10".to_string(),
            username_id: None,
            name: "Summer Sale".to_string(),
            adv_slug_name: slug.map(str::to_string),
            brand_slug_name: None,
            budget: Decimal::new(50000, 2),
            max_fee_per_like: 3,
            expire_date: NaiveDate::from_ymd_opt(2018, 8, 13).unwrap(),
            adv_image: None,
            adv_desc: None,
            adv_min_follower: None,
            adv_max_follower: None,
            is_approved: false,
            create_date: Utc::now().into(),
            publish_date: None,
        }
    }

    #[test]
    fn display_is_the_advertisement_name() {
        assert_eq!(sample(None).to_string(), "Summer Sale");
    }

    #[test]
    fn absolute_url_uses_slug_and_primary_key() {
        let adv = sample(Some("summer-sale"));
        assert_eq!(
            adv.get_absolute_url().unwrap(),
            "/advertisement/summer-sale/7/publish/"
        );
    }

    #[test]
    fn absolute_url_requires_slug() {
        assert!(matches!(
            sample(None).get_absolute_url(),
            Err(UrlError::MissingSlug { pk: 7 })
        ));
        assert!(sample(Some("")).get_absolute_url().is_err());
    }

    #[test]
    fn image_upload_path_keeps_file_name_only() {
        assert_eq!(
            image_upload_path("banner.png").as_deref(),
            Some("adv_image/banner.png")
        );
        assert_eq!(
            image_upload_path("/tmp/uploads/banner.png").as_deref(),
            Some("adv_image/banner.png")
        );
        assert_eq!(image_upload_path("uploads/"), None);
        assert_eq!(image_upload_path(".."), None);
    }
}
