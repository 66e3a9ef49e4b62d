//! `db` command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use scrapeplan_core::{load_category_mappings, AppConfig, TargetKind};

use crate::DEFAULT_MAPPINGS_PATH;

#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Run pending migrations
    Migrate,
    /// Upsert curated category mappings from a YAML file
    Seed {
        #[arg(long, default_value = DEFAULT_MAPPINGS_PATH)]
        file: PathBuf,
    },
    /// List stored mappings of one kind
    Mappings {
        /// community, marketplace_category, popular_product or hashtag
        #[arg(long)]
        kind: TargetKind,
    },
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = scrapeplan_db::connect_pool_from_config(config).await?;

    match command {
        DbCommands::Ping => {
            scrapeplan_db::health_check(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = scrapeplan_db::run_migrations(&pool).await?;
            println!("applied {applied} migrations");
        }
        DbCommands::Seed { file } => {
            let mappings = load_category_mappings(&file)?;
            let written = scrapeplan_db::seed_category_mappings(&pool, &mappings.mappings).await?;
            tracing::info!(
                file = %file.display(),
                groups = mappings.mappings.len(),
                rows = written,
                "category mappings seeded"
            );
            println!("seeded {written} category mapping rows");
        }
        DbCommands::Mappings { kind } => {
            let rows = scrapeplan_db::list_category_mappings(&pool, kind).await?;
            if rows.is_empty() {
                println!("no {kind} mappings stored");
            }
            for row in rows {
                println!(
                    "{:<20} {:<20} {:>3}  {}",
                    row.category, row.subcategory, row.priority, row.value
                );
            }
        }
    }

    Ok(())
}
