//! Test utilities for database testing.
//!
//! Opens in-memory SQLite databases with every migration applied and
//! provides fixture helpers for users, categories and advertisements.

use adverts::models::{adv_summary, category, user};
use adverts::repositories::{
    AdvSummaryRepository, CategoryRepository, CreateAdvSummaryRequest, UserRepository,
};
use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::sync::Arc;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // Deletion tests depend on foreign keys being enforced.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Same as [`setup_test_db`], wrapped for repository constructors.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    Ok(Arc::new(setup_test_db().await?))
}

/// Expire date thirty days from today.
#[allow(dead_code)]
pub fn expire_in_30_days() -> NaiveDate {
    (Utc::now() + Duration::days(30)).date_naive()
}

/// A valid advertisement request with the given name and no optional fields.
#[allow(dead_code)]
pub fn advertisement_request(name: &str) -> CreateAdvSummaryRequest {
    CreateAdvSummaryRequest {
        name: name.to_string(),
        budget: Decimal::new(50000, 2),
        max_fee_per_like: 3,
        expire_date: expire_in_30_days(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub async fn create_advertisement(
    db: &Arc<DatabaseConnection>,
    name: &str,
) -> Result<adv_summary::Model> {
    let repo = AdvSummaryRepository::new(db.clone());
    Ok(repo.create(advertisement_request(name)).await?)
}

#[allow(dead_code)]
pub async fn create_category(
    db: &Arc<DatabaseConnection>,
    name: &str,
) -> Result<category::Model> {
    let repo = CategoryRepository::new(db.clone());
    Ok(repo.create(name).await?)
}

#[allow(dead_code)]
pub async fn create_user(db: &Arc<DatabaseConnection>, username: &str) -> Result<user::Model> {
    let repo = UserRepository::new(db.clone());
    Ok(repo
        .create(username, Some(&format!("{username}@example.com")))
        .await?)
}
