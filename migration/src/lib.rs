//! Database migrations for the advertisement data layer.
//!
//! Migrations are applied in the order listed by [`Migrator`]. The brand
//! table is created exactly as it was first generated, including the
//! `adv_slug_name` and `adv_id` columns the current brand model no longer maps.

pub use sea_orm_migration::prelude::*;

mod m2018_07_14_000001_create_users;
mod m2018_07_14_000002_create_categories;
mod m2018_07_14_000003_create_adv_summaries;
mod m2018_07_14_000004_create_adv_categories;
mod m2018_07_14_130400_create_brands;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2018_07_14_000001_create_users::Migration),
            Box::new(m2018_07_14_000002_create_categories::Migration),
            Box::new(m2018_07_14_000003_create_adv_summaries::Migration),
            Box::new(m2018_07_14_000004_create_adv_categories::Migration),
            Box::new(m2018_07_14_130400_create_brands::Migration),
        ]
    }
}
