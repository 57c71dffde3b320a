//! Advertisement repository for database operations
//!
//! Listing order is `publish_date` descending with unpublished
//! advertisements last, ties broken by newest id first.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Expr, NullOrdering, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use std::sync::Arc;

use super::{NAME_MAX_LENGTH, validate_max_length, validate_required_text, validate_slug};
use crate::error::RepositoryError;
use crate::models::adv_category::{self, Entity as AdvCategory};
use crate::models::adv_summary::{self, Entity as AdvSummary, image_upload_path};
use crate::models::category::{self, Entity as Category};

/// Maximum length of a caller-supplied guid
pub const GUID_MAX_LENGTH: usize = 100;

/// Decimal places kept for a budget
pub const BUDGET_DECIMAL_PLACES: u32 = 2;

/// SQLite keeps budgets in a `real` column, exact only up to this many digits
const SQLITE_BUDGET_MAX_DIGITS: usize = 15;

/// Request data for creating an advertisement
#[derive(Debug, Clone, Default)]
pub struct CreateAdvSummaryRequest {
    pub name: String,
    pub budget: Decimal,
    pub max_fee_per_like: i32,
    pub expire_date: NaiveDate,
    /// Generated when `None`
    pub guid: Option<String>,
    pub username_id: Option<i32>,
    pub adv_slug_name: Option<String>,
    pub brand_slug_name: Option<String>,
    pub adv_desc: Option<String>,
    pub adv_min_follower: Option<i32>,
    pub adv_max_follower: Option<i32>,
}

/// Partial update of an advertisement. `None` leaves a field untouched;
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdvSummaryRequest {
    pub name: Option<String>,
    pub budget: Option<Decimal>,
    pub max_fee_per_like: Option<i32>,
    pub expire_date: Option<NaiveDate>,
    pub adv_slug_name: Option<Option<String>>,
    pub brand_slug_name: Option<Option<String>>,
    pub adv_desc: Option<Option<String>>,
    pub adv_min_follower: Option<Option<i32>>,
    pub adv_max_follower: Option<Option<i32>>,
}

/// Repository for advertisement database operations
#[derive(Debug, Clone)]
pub struct AdvSummaryRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AdvSummaryRepository {
    /// Creates a new AdvSummaryRepository instance
    ///
    /// # Arguments
    ///
    /// * `db` - Database connection pool
    ///
    /// # Returns
    ///
    /// Returns a new AdvSummaryRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates an advertisement.
    ///
    /// `guid`, `create_date` and `is_approved` are filled in by the entity when absent.
    ///
    /// # Arguments
    ///
    /// * `request` - Field values; `guid` is generated when absent
    ///
    /// # Returns
    ///
    /// Returns the stored advertisement. Invalid fields fail with `Validation` before any SQL
    /// is sent; a taken guid or slug fails with `Conflict`.
    pub async fn create(
        &self,
        request: CreateAdvSummaryRequest,
    ) -> Result<adv_summary::Model, RepositoryError> {
        let name = validate_required_text("name", &request.name, NAME_MAX_LENGTH)?;
        if let Some(guid) = &request.guid {
            validate_required_text("guid", guid, GUID_MAX_LENGTH)?;
        }
        validate_slug("adv_slug_name", request.adv_slug_name.as_deref())?;
        validate_slug("brand_slug_name", request.brand_slug_name.as_deref())?;
        validate_description(request.adv_desc.as_deref())?;
        validate_follower_range(request.adv_min_follower, request.adv_max_follower)?;
        validate_budget(request.budget, self.db.get_database_backend())?;

        let mut active = adv_summary::ActiveModel {
            name: Set(name),
            username_id: Set(request.username_id),
            adv_slug_name: Set(request.adv_slug_name),
            brand_slug_name: Set(request.brand_slug_name),
            budget: Set(request.budget),
            max_fee_per_like: Set(request.max_fee_per_like),
            expire_date: Set(request.expire_date),
            adv_image: Set(None),
            adv_desc: Set(request.adv_desc),
            adv_min_follower: Set(request.adv_min_follower),
            adv_max_follower: Set(request.adv_max_follower),
            publish_date: Set(None),
            ..Default::default()
        };
        if let Some(guid) = request.guid {
            active.guid = Set(guid.trim().to_string());
        }

        let created = active.insert(&*self.db).await.map_err(|err| {
            let err = RepositoryError::database_error(err);
            if err.is_conflict() {
                tracing::warn!(error = %err, "Advertisement guid or slug already in use");
            }
            err
        })?;

        tracing::info!(
            advertisement_id = created.id,
            guid = %created.guid,
            "Advertisement created"
        );
        Ok(created)
    }

    /// Finds an advertisement by primary key
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    ///
    /// # Returns
    ///
    /// Returns the advertisement if found
    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<adv_summary::Model>, RepositoryError> {
        AdvSummary::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Finds an advertisement by its guid
    ///
    /// # Arguments
    ///
    /// * `guid` - Globally unique identifier
    pub async fn get_by_guid(
        &self,
        guid: &str,
    ) -> Result<Option<adv_summary::Model>, RepositoryError> {
        AdvSummary::find()
            .filter(adv_summary::Column::Guid.eq(guid))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Finds an advertisement by `adv_slug_name`
    ///
    /// # Arguments
    ///
    /// * `adv_slug_name` - Advertisement slug
    pub async fn get_by_slug(
        &self,
        adv_slug_name: &str,
    ) -> Result<Option<adv_summary::Model>, RepositoryError> {
        AdvSummary::find()
            .filter(adv_summary::Column::AdvSlugName.eq(adv_slug_name))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Lists every advertisement in listing order
    pub async fn list(&self) -> Result<Vec<adv_summary::Model>, RepositoryError> {
        listing_order(AdvSummary::find())
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Lists published advertisements, most recently published first
    pub async fn list_published(&self) -> Result<Vec<adv_summary::Model>, RepositoryError> {
        listing_order(AdvSummary::find().filter(adv_summary::Column::PublishDate.is_not_null()))
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Lists advertisements owned by a user
    ///
    /// # Arguments
    ///
    /// * `username_id` - Owning user id
    pub async fn list_by_owner(
        &self,
        username_id: i32,
    ) -> Result<Vec<adv_summary::Model>, RepositoryError> {
        listing_order(
            AdvSummary::find().filter(adv_summary::Column::UsernameId.eq(username_id)),
        )
        .all(&*self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Lists advertisements linked to a category
    ///
    /// # Arguments
    ///
    /// * `category_id` - Category id
    ///
    /// # Returns
    ///
    /// Returns the advertisements in listing order
    pub async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<adv_summary::Model>, RepositoryError> {
        listing_order(
            AdvSummary::find()
                .inner_join(AdvCategory)
                .filter(adv_category::Column::CategoryId.eq(category_id)),
        )
        .all(&*self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Categories linked to an advertisement, ordered by name
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    pub async fn categories(&self, id: i32) -> Result<Vec<category::Model>, RepositoryError> {
        Category::find()
            .inner_join(AdvCategory)
            .filter(adv_category::Column::AdvertisementId.eq(id))
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Applies a partial update
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    /// * `request` - Fields to change; `None` leaves a field as is, `Some(None)` clears a
    ///   nullable one
    ///
    /// # Returns
    ///
    /// Returns the updated advertisement, `NotFound`, or `Validation`
    pub async fn update(
        &self,
        id: i32,
        request: UpdateAdvSummaryRequest,
    ) -> Result<adv_summary::Model, RepositoryError> {
        let existing = self.require(id).await?;

        let min = request
            .adv_min_follower
            .unwrap_or(existing.adv_min_follower);
        let max = request
            .adv_max_follower
            .unwrap_or(existing.adv_max_follower);
        validate_follower_range(min, max)?;

        let mut active = existing.into_active_model();

        if let Some(name) = request.name {
            active.name = Set(validate_required_text("name", &name, NAME_MAX_LENGTH)?);
        }
        if let Some(budget) = request.budget {
            validate_budget(budget, self.db.get_database_backend())?;
            active.budget = Set(budget);
        }
        if let Some(fee) = request.max_fee_per_like {
            active.max_fee_per_like = Set(fee);
        }
        if let Some(expire_date) = request.expire_date {
            active.expire_date = Set(expire_date);
        }
        if let Some(slug) = request.adv_slug_name {
            validate_slug("adv_slug_name", slug.as_deref())?;
            active.adv_slug_name = Set(slug);
        }
        if let Some(slug) = request.brand_slug_name {
            validate_slug("brand_slug_name", slug.as_deref())?;
            active.brand_slug_name = Set(slug);
        }
        if let Some(desc) = request.adv_desc {
            validate_description(desc.as_deref())?;
            active.adv_desc = Set(desc);
        }
        active.adv_min_follower = Set(min);
        active.adv_max_follower = Set(max);

        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Publishes an advertisement, overwriting any earlier publish date
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    ///
    /// # Returns
    ///
    /// Returns the advertisement with `publish_date` set to now
    pub async fn publish(&self, id: i32) -> Result<adv_summary::Model, RepositoryError> {
        let existing = self.require(id).await?;
        let published = existing
            .publish(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            advertisement_id = published.id,
            publish_date = ?published.publish_date,
            "Advertisement published"
        );
        Ok(published)
    }

    /// Sets the approval flag
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    /// * `approved` - New flag value
    ///
    /// # Returns
    ///
    /// Returns the updated advertisement, or `NotFound`
    pub async fn set_approved(
        &self,
        id: i32,
        approved: bool,
    ) -> Result<adv_summary::Model, RepositoryError> {
        let mut active = self.require(id).await?.into_active_model();
        active.is_approved = Set(approved);
        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Assigns or clears the owning user
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    /// * `username_id` - New owner, or `None` to clear
    pub async fn set_owner(
        &self,
        id: i32,
        username_id: Option<i32>,
    ) -> Result<adv_summary::Model, RepositoryError> {
        let mut active = self.require(id).await?.into_active_model();
        active.username_id = Set(username_id);
        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Records the stored image path (`adv_image/<file name>`)
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    /// * `file_name` - Uploaded file name; only its last path component is kept
    ///
    /// # Returns
    ///
    /// Returns the updated advertisement, or `Validation` for an empty file name
    pub async fn attach_image(
        &self,
        id: i32,
        file_name: &str,
    ) -> Result<adv_summary::Model, RepositoryError> {
        let path = image_upload_path(file_name).ok_or_else(|| {
            RepositoryError::validation_error(format!("invalid image file name '{file_name}'"))
        })?;
        validate_max_length("adv_image", &path, 100)?;

        let mut active = self.require(id).await?.into_active_model();
        active.adv_image = Set(Some(path));
        active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Deletes an advertisement, its category links, and clears brand rows that still point
    /// at it through the legacy `brands.adv_id` column.
    ///
    /// # Arguments
    ///
    /// * `id` - Advertisement id
    ///
    /// # Returns
    ///
    /// Returns `NotFound` when no advertisement has this id; all changes are rolled back in
    /// that case
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let unlinked = AdvCategory::delete_many()
            .filter(adv_category::Column::AdvertisementId.eq(id))
            .exec(&txn)
            .await?;

        let clear_brand_links = Query::update()
            .table(Alias::new("brands"))
            .value(Alias::new("adv_id"), Option::<i32>::None)
            .and_where(Expr::col(Alias::new("adv_id")).eq(id))
            .to_owned();
        let backend = txn.get_database_backend();
        txn.execute(backend.build(&clear_brand_links)).await?;

        let result = AdvSummary::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::not_found(format!("advertisement {id}")));
        }

        txn.commit().await?;

        tracing::info!(
            advertisement_id = id,
            unlinked_categories = unlinked.rows_affected,
            "Advertisement deleted"
        );
        Ok(())
    }

    async fn require(&self, id: i32) -> Result<adv_summary::Model, RepositoryError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("advertisement {id}")))
    }
}

fn listing_order(query: Select<AdvSummary>) -> Select<AdvSummary> {
    query
        .order_by_with_nulls(
            adv_summary::Column::PublishDate,
            Order::Desc,
            NullOrdering::Last,
        )
        .order_by_desc(adv_summary::Column::Id)
}

/// Rejects budgets the storage column would silently round.
fn validate_budget(budget: Decimal, backend: DbBackend) -> Result<(), RepositoryError> {
    let normalized = budget.normalize();
    if normalized.scale() > BUDGET_DECIMAL_PLACES {
        return Err(RepositoryError::validation_error(format!(
            "budget {budget} has more than {BUDGET_DECIMAL_PLACES} decimal places"
        )));
    }

    let digits = normalized.mantissa().unsigned_abs().to_string().len();
    if backend == DbBackend::Sqlite && digits > SQLITE_BUDGET_MAX_DIGITS {
        return Err(RepositoryError::validation_error(format!(
            "budget {budget} has more than {SQLITE_BUDGET_MAX_DIGITS} significant digits"
        )));
    }
    Ok(())
}

fn validate_description(desc: Option<&str>) -> Result<(), RepositoryError> {
    match desc {
        Some(desc) => validate_max_length("adv_desc", desc, NAME_MAX_LENGTH),
        None => Ok(()),
    }
}

fn validate_follower_range(min: Option<i32>, max: Option<i32>) -> Result<(), RepositoryError> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err(RepositoryError::validation_error(
            "follower bounds cannot be negative",
        ));
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(RepositoryError::validation_error(format!(
            "adv_min_follower ({min}) cannot exceed adv_max_follower ({max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_range_checks() {
        assert!(validate_follower_range(None, None).is_ok());
        assert!(validate_follower_range(Some(100), None).is_ok());
        assert!(validate_follower_range(Some(100), Some(100)).is_ok());
        assert!(validate_follower_range(Some(101), Some(100)).is_err());
        assert!(validate_follower_range(Some(-1), None).is_err());
    }

    #[test]
    fn budget_scale_is_limited_to_two_places() {
        assert!(validate_budget(Decimal::new(50000, 2), DbBackend::Postgres).is_ok());
        assert!(validate_budget(Decimal::new(5_000_000, 4), DbBackend::Postgres).is_ok());
        assert!(validate_budget(Decimal::new(1005, 3), DbBackend::Postgres).is_err());
        assert!(validate_budget(Decimal::new(1005, 3), DbBackend::Sqlite).is_err());
    }

    #[test]
    fn sqlite_budgets_fit_in_a_double() {
        let wide = Decimal::new(1_234_567_890_123_456_789, 2);
        assert!(validate_budget(wide, DbBackend::Postgres).is_ok());
        assert!(validate_budget(wide, DbBackend::Sqlite).is_err());
        assert!(validate_budget(Decimal::new(123_456_789_012_325, 2), DbBackend::Sqlite).is_ok());
    }

    #[test]
    fn description_length_is_bounded() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("short")).is_ok());
        assert!(validate_description(Some(&"d".repeat(256))).is_err());
    }
}
