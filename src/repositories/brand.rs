//! Brand repository for database operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use super::{NAME_MAX_LENGTH, validate_required_text};
use crate::error::RepositoryError;
use crate::models::brand::{self, Entity as Brand};

/// Repository for brand database operations
#[derive(Debug, Clone)]
pub struct BrandRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl BrandRepository {
    /// Creates a new BrandRepository instance
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    ///
    /// # Returns
    ///
    /// Returns a new BrandRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a brand, optionally owned by a user.
    ///
    /// # Arguments
    ///
    /// * `name` - Brand name; trimmed, at most 255 characters
    /// * `username_id` - Owning user, if any
    ///
    /// # Returns
    ///
    /// Returns the stored brand. A user owns at most one brand; a second brand for the same
    /// user fails with [`RepositoryError::Conflict`].
    pub async fn create(
        &self,
        name: &str,
        username_id: Option<i32>,
    ) -> Result<brand::Model, RepositoryError> {
        let name = validate_required_text("name", name, NAME_MAX_LENGTH)?;

        let brand = brand::ActiveModel {
            name: Set(name),
            username_id: Set(username_id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(brand_id = brand.id, username_id = ?brand.username_id, "Brand created");
        Ok(brand)
    }

    /// Finds a brand by primary key
    ///
    /// # Arguments
    ///
    /// * `id` - Brand id
    ///
    /// # Returns
    ///
    /// Returns the brand if found
    pub async fn get_by_id(&self, id: i32) -> Result<Option<brand::Model>, RepositoryError> {
        Brand::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// The brand owned by a user, if any
    ///
    /// # Arguments
    ///
    /// * `username_id` - Owning user id
    pub async fn get_by_user(
        &self,
        username_id: i32,
    ) -> Result<Option<brand::Model>, RepositoryError> {
        Brand::find()
            .filter(brand::Column::UsernameId.eq(username_id))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Lists all brands ordered by name, then id
    pub async fn list_all(&self) -> Result<Vec<brand::Model>, RepositoryError> {
        Brand::find()
            .order_by_asc(brand::Column::Name)
            .order_by_asc(brand::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Renames a brand
    ///
    /// # Arguments
    ///
    /// * `id` - Brand id
    /// * `name` - New brand name
    ///
    /// # Returns
    ///
    /// Returns the updated brand, or `NotFound`
    pub async fn rename(&self, id: i32, name: &str) -> Result<brand::Model, RepositoryError> {
        let name = validate_required_text("name", name, NAME_MAX_LENGTH)?;

        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("brand {id}")))?;

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Deletes a brand
    ///
    /// # Arguments
    ///
    /// * `id` - Brand id
    ///
    /// # Returns
    ///
    /// Returns `NotFound` when no brand has this id
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Brand::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(format!("brand {id}")));
        }
        Ok(())
    }
}
