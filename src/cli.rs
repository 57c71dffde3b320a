//! Operator command line.
//!
//! Each subcommand maps onto a repository operation or the migrator.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::models::adv_summary;
use crate::repositories::{AdvSummaryRepository, UserRepository};

#[derive(Parser, Debug)]
#[command(
    name = "adverts",
    version,
    about = "Manage the advertisement database: migrations, publishing and listings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply, roll back or inspect schema migrations
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
    /// Publish an advertisement (stamps the publish date with the current time)
    Publish {
        /// Advertisement primary key
        id: i32,
    },
    /// List advertisements, most recently published first
    List {
        /// Only show advertisements that have been published
        #[arg(long)]
        published: bool,
    },
    /// Delete a user; their advertisements and brand are kept
    DeleteUser {
        /// User primary key
        id: i32,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrateAction {
    /// Apply all pending migrations
    #[default]
    Up,
    /// Roll back the most recent migration
    Down,
    /// Show applied and pending migrations
    Status,
    /// Drop all tables and re-apply every migration
    Fresh,
}

/// Runs a command against an open connection, returning the lines to print.
pub async fn run(
    command: Command,
    config: &AppConfig,
    db: DatabaseConnection,
) -> Result<Vec<String>> {
    match command {
        Command::Migrate { action } => migrate(action.unwrap_or_default(), &db).await,
        Command::Publish { id } => {
            let repo = AdvSummaryRepository::new(Arc::new(db));
            let published = repo
                .publish(id)
                .await
                .with_context(|| format!("publishing advertisement {id}"))?;
            let mut lines = vec![format!(
                "Published '{}' (id {}) at {}",
                published,
                published.id,
                published
                    .publish_date
                    .map(|date| date.to_rfc3339())
                    .unwrap_or_default()
            )];
            if let Ok(url) = published.get_absolute_url() {
                lines.push(format!("URL: {url}"));
            }
            Ok(lines)
        }
        Command::List { published } => {
            let repo = AdvSummaryRepository::new(Arc::new(db));
            let advertisements = if published {
                repo.list_published().await?
            } else {
                repo.list().await?
            };
            Ok(advertisements
                .iter()
                .map(|adv| listing_line(adv, config))
                .collect())
        }
        Command::DeleteUser { id } => {
            let repo = UserRepository::new(Arc::new(db));
            repo.delete(id)
                .await
                .with_context(|| format!("deleting user {id}"))?;
            Ok(vec![format!("Deleted user {id}")])
        }
    }
}

async fn migrate(action: MigrateAction, db: &DatabaseConnection) -> Result<Vec<String>> {
    match action {
        MigrateAction::Up => {
            let pending = Migrator::get_pending_migrations(db).await?;
            Migrator::up(db, None).await.context("applying migrations")?;
            Ok(vec![format!("Applied {} migration(s)", pending.len())])
        }
        MigrateAction::Down => {
            Migrator::down(db, Some(1))
                .await
                .context("rolling back migration")?;
            Ok(vec!["Rolled back 1 migration".to_string()])
        }
        MigrateAction::Status => {
            let mut lines = Vec::new();
            for migration in Migrator::get_applied_migrations(db).await? {
                lines.push(format!("applied  {}", migration.name()));
            }
            for migration in Migrator::get_pending_migrations(db).await? {
                lines.push(format!("pending  {}", migration.name()));
            }
            Ok(lines)
        }
        MigrateAction::Fresh => {
            Migrator::fresh(db).await.context("recreating schema")?;
            Ok(vec!["Recreated schema from scratch".to_string()])
        }
    }
}

fn listing_line(adv: &adv_summary::Model, config: &AppConfig) -> String {
    let published = adv
        .publish_date
        .map(|date| date.to_rfc3339())
        .unwrap_or_else(|| "unpublished".to_string());
    let mut line = format!(
        "{:>6}  {}  {}  budget={} fee/like={} expires={}",
        adv.id, published, adv, adv.budget, adv.max_fee_per_like, adv.expire_date
    );
    if adv.is_approved {
        line.push_str("  [approved]");
    }
    if let Some(image) = &adv.adv_image {
        line.push_str(&format!("  image={}", config.media_path_url(image)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_migrate_without_action() {
        let cli = Cli::try_parse_from(["adverts", "migrate"]).unwrap();
        assert_eq!(cli.command, Command::Migrate { action: None });
    }

    #[test]
    fn parses_migrate_status() {
        let cli = Cli::try_parse_from(["adverts", "migrate", "status"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Migrate {
                action: Some(MigrateAction::Status)
            }
        );
    }

    #[test]
    fn parses_publish_and_list() {
        let cli = Cli::try_parse_from(["adverts", "publish", "42"]).unwrap();
        assert_eq!(cli.command, Command::Publish { id: 42 });

        let cli = Cli::try_parse_from(["adverts", "list", "--published"]).unwrap();
        assert_eq!(cli.command, Command::List { published: true });
    }

    #[test]
    fn parses_delete_user() {
        let cli = Cli::try_parse_from(["adverts", "delete-user", "5"]).unwrap();
        assert_eq!(cli.command, Command::DeleteUser { id: 5 });
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["adverts", "publish", "abc"]).is_err());
    }
}
