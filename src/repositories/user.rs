//! User repository
//!
//! Users are owned by the identity subsystem. Only the operations the data
//! layer depends on are exposed here, chiefly deletion, which must leave
//! advertisements and brands in place with their owner cleared.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;

use super::{validate_max_length, validate_required_text};
use crate::error::RepositoryError;
use crate::models::adv_summary::{self, Entity as AdvSummary};
use crate::models::brand::{self, Entity as Brand};
use crate::models::user::{self, Entity as User};

const USERNAME_MAX_LENGTH: usize = 150;
const EMAIL_MAX_LENGTH: usize = 254;

/// Repository for user records
#[derive(Debug, Clone)]
pub struct UserRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    ///
    /// # Returns
    ///
    /// Returns a new UserRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a user
    ///
    /// # Arguments
    ///
    /// * `username` - Unique login name, at most 150 characters
    /// * `email` - Optional address, at most 254 characters
    ///
    /// # Returns
    ///
    /// Returns the stored user, or `Conflict` when the username is taken
    pub async fn create(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<user::Model, RepositoryError> {
        let username = validate_required_text("username", username, USERNAME_MAX_LENGTH)?;
        if let Some(email) = email {
            validate_max_length("email", email, EMAIL_MAX_LENGTH)?;
        }

        user::ActiveModel {
            username: Set(username),
            email: Set(email.map(str::to_string)),
            date_joined: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Finds a user by primary key
    pub async fn get_by_id(&self, id: i32) -> Result<Option<user::Model>, RepositoryError> {
        User::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Deletes a user.
    ///
    /// Advertisements and the brand owned by the user survive with their
    /// owner reference set to NULL. All changes commit atomically.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let orphaned_ads = AdvSummary::update_many()
            .col_expr(
                adv_summary::Column::UsernameId,
                Expr::value(Option::<i32>::None),
            )
            .filter(adv_summary::Column::UsernameId.eq(id))
            .exec(&txn)
            .await?;

        let orphaned_brands = Brand::update_many()
            .col_expr(brand::Column::UsernameId, Expr::value(Option::<i32>::None))
            .filter(brand::Column::UsernameId.eq(id))
            .exec(&txn)
            .await?;

        let result = User::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::not_found(format!("user {id}")));
        }

        txn.commit().await?;

        tracing::info!(
            user_id = id,
            orphaned_advertisements = orphaned_ads.rows_affected,
            orphaned_brands = orphaned_brands.rows_affected,
            "User deleted"
        );
        Ok(())
    }
}
