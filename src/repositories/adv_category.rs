//! Repository for advertisement/category links

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use crate::error::RepositoryError;
use crate::models::adv_category::{self, Entity as AdvCategory};

/// Repository for the `adv_categories` join table
#[derive(Debug, Clone)]
pub struct AdvCategoryRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AdvCategoryRepository {
    /// Creates a new AdvCategoryRepository instance
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    ///
    /// # Returns
    ///
    /// Returns a new AdvCategoryRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Links an advertisement to a category.
    ///
    /// # Arguments
    ///
    /// * `advertisement_id` - Advertisement id
    /// * `category_id` - Category id
    ///
    /// # Returns
    ///
    /// Returns the new link row. Linking the same pair twice fails with
    /// [`RepositoryError::Conflict`].
    pub async fn link(
        &self,
        advertisement_id: i32,
        category_id: i32,
    ) -> Result<adv_category::Model, RepositoryError> {
        let link = adv_category::ActiveModel {
            advertisement_id: Set(advertisement_id),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::debug!(
            link_id = link.id,
            advertisement_id,
            category_id,
            "Advertisement linked to category"
        );
        Ok(link)
    }

    /// Removes a link between an advertisement and a category
    ///
    /// # Arguments
    ///
    /// * `advertisement_id` - Advertisement id
    /// * `category_id` - Category id
    ///
    /// # Returns
    ///
    /// Returns `NotFound` when the pair was not linked
    pub async fn unlink(&self, advertisement_id: i32, category_id: i32) -> Result<(), RepositoryError> {
        let result = AdvCategory::delete_many()
            .filter(adv_category::Column::AdvertisementId.eq(advertisement_id))
            .filter(adv_category::Column::CategoryId.eq(category_id))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(format!(
                "link between advertisement {advertisement_id} and category {category_id}"
            )));
        }
        Ok(())
    }

    /// Finds a link row by primary key
    pub async fn get_by_id(&self, id: i32) -> Result<Option<adv_category::Model>, RepositoryError> {
        AdvCategory::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Whether the advertisement is linked to the category
    ///
    /// # Arguments
    ///
    /// * `advertisement_id` - Advertisement id
    /// * `category_id` - Category id
    pub async fn is_linked(
        &self,
        advertisement_id: i32,
        category_id: i32,
    ) -> Result<bool, RepositoryError> {
        let count = AdvCategory::find()
            .filter(adv_category::Column::AdvertisementId.eq(advertisement_id))
            .filter(adv_category::Column::CategoryId.eq(category_id))
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(count > 0)
    }

    /// Link rows of one advertisement, in insertion order
    pub async fn list_by_advertisement(
        &self,
        advertisement_id: i32,
    ) -> Result<Vec<adv_category::Model>, RepositoryError> {
        AdvCategory::find()
            .filter(adv_category::Column::AdvertisementId.eq(advertisement_id))
            .order_by_asc(adv_category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Link rows of one category, in insertion order
    pub async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<adv_category::Model>, RepositoryError> {
        AdvCategory::find()
            .filter(adv_category::Column::CategoryId.eq(category_id))
            .order_by_asc(adv_category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// String form of a link: the linked advertisement's name
    ///
    /// # Arguments
    ///
    /// * `link` - Link row to describe
    pub async fn display_name(&self, link: &adv_category::Model) -> Result<String, RepositoryError> {
        link.display_name(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
