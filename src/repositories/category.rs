//! Category repository for database operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use super::{NAME_MAX_LENGTH, validate_required_text};
use crate::error::RepositoryError;
use crate::models::adv_category::{self, Entity as AdvCategory};
use crate::models::category::{self, Entity as Category};

/// Repository for category database operations
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository instance
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    ///
    /// # Returns
    ///
    /// Returns a new CategoryRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a category with the given name
    ///
    /// # Arguments
    ///
    /// * `name` - Display name; trimmed, at most 255 characters
    ///
    /// # Returns
    ///
    /// Returns the stored category with both timestamps set
    pub async fn create(&self, name: &str) -> Result<category::Model, RepositoryError> {
        let name = validate_required_text("name", name, NAME_MAX_LENGTH)?;

        let category = category::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Finds a category by primary key
    ///
    /// # Arguments
    ///
    /// * `id` - Category id
    ///
    /// # Returns
    ///
    /// Returns the category if found
    pub async fn get_by_id(&self, id: i32) -> Result<Option<category::Model>, RepositoryError> {
        Category::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Finds a category by exact name
    ///
    /// # Arguments
    ///
    /// * `name` - Category name
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<category::Model>, RepositoryError> {
        Category::find()
            .filter(category::Column::Name.eq(name))
            .order_by_asc(category::Column::Id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Lists all categories ordered by name, then id
    pub async fn list_all(&self) -> Result<Vec<category::Model>, RepositoryError> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Renames a category
    ///
    /// # Arguments
    ///
    /// * `id` - Category id
    /// * `name` - New display name
    ///
    /// # Returns
    ///
    /// Returns the updated category; `update_date` is refreshed, `insert_date` is not
    pub async fn rename(&self, id: i32, name: &str) -> Result<category::Model, RepositoryError> {
        let name = validate_required_text("name", name, NAME_MAX_LENGTH)?;

        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("category {id}")))?;

        let mut active = existing.into_active_model();
        active.name = Set(name);

        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Deletes a category together with its advertisement links
    ///
    /// # Arguments
    ///
    /// * `id` - Category id
    ///
    /// # Returns
    ///
    /// Returns `NotFound` when no category has this id; nothing is removed in that case
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let unlinked = AdvCategory::delete_many()
            .filter(adv_category::Column::CategoryId.eq(id))
            .exec(&txn)
            .await?;

        let result = Category::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::not_found(format!("category {id}")));
        }

        txn.commit().await?;

        tracing::info!(
            category_id = id,
            unlinked_advertisements = unlinked.rows_affected,
            "Category deleted"
        );
        Ok(())
    }
}
