//! Integration tests for CategoryRepository.

use adverts::error::RepositoryError;
use adverts::repositories::CategoryRepository;
use anyhow::Result;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db_arc;

#[tokio::test]
async fn create_sets_both_timestamps() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = CategoryRepository::new(db.clone());

    let created = repo.create("  Fashion ").await?;

    assert_eq!(created.name, "Fashion");
    assert_eq!(created.to_string(), "Fashion");
    assert!(created.insert_date.is_some());
    Ok(())
}

#[tokio::test]
async fn rename_refreshes_update_date_only() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = CategoryRepository::new(db.clone());

    let created = repo.create("Fashion").await?;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let renamed = repo.rename(created.id, "Apparel").await?;

    assert_eq!(renamed.name, "Apparel");
    assert_eq!(renamed.insert_date, created.insert_date);
    assert!(renamed.update_date > created.update_date);
    Ok(())
}

#[tokio::test]
async fn list_all_is_sorted_by_name() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = CategoryRepository::new(db.clone());

    repo.create("Travel").await?;
    repo.create("Beauty").await?;
    repo.create("Fashion").await?;

    let names: Vec<String> = repo.list_all().await?.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Beauty", "Fashion", "Travel"]);

    let fashion = repo.find_by_name("Fashion").await?;
    assert!(fashion.is_some());
    assert!(repo.find_by_name("Sports").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn names_are_validated() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = CategoryRepository::new(db.clone());

    assert!(matches!(
        repo.create("").await,
        Err(RepositoryError::Validation(_))
    ));
    assert!(matches!(
        repo.create(&"c".repeat(256)).await,
        Err(RepositoryError::Validation(_))
    ));
    assert!(repo.create(&"c".repeat(255)).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn missing_category_operations_are_not_found() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = CategoryRepository::new(db.clone());

    assert!(matches!(
        repo.rename(77, "Anything").await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(77).await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}
