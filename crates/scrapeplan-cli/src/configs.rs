//! `configs` command handlers. Read-only.

use clap::Subcommand;
use scrapeplan_core::{AppConfig, StoredConfig};
use uuid::Uuid;

#[derive(Debug, Subcommand)]
pub enum ConfigsCommands {
    /// Print one stored config
    Show {
        /// Public id returned by `generate`
        #[arg(long)]
        id: Uuid,
    },
    /// List a project's stored configs, newest first
    List {
        #[arg(long)]
        project_id: String,
        /// Maximum number of configs to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

pub(crate) async fn run_configs(config: &AppConfig, command: ConfigsCommands) -> anyhow::Result<()> {
    let pool = scrapeplan_db::connect_pool_from_config(config).await?;

    match command {
        ConfigsCommands::Show { id } => {
            let row = match scrapeplan_db::get_scraping_config(&pool, id).await {
                Ok(row) => row,
                Err(scrapeplan_db::DbError::NotFound) => anyhow::bail!("no scraping config {id}"),
                Err(e) => return Err(e.into()),
            };
            if let Err(e) = row.decode() {
                tracing::warn!(public_id = %id, error = %e, "stored config does not match the current schema");
            }
            let stored = StoredConfig::from(row);
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        ConfigsCommands::List { project_id, limit } => {
            let rows =
                scrapeplan_db::list_scraping_configs_for_project(&pool, &project_id, limit).await?;
            if rows.is_empty() {
                println!("no scraping configs for project '{project_id}'");
                return Ok(());
            }
            for row in rows {
                println!(
                    "{}  {:<9} {:<22} {:.1}  {}",
                    row.public_id,
                    row.status,
                    row.keyword_source,
                    row.keyword_confidence,
                    row.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                );
            }
        }
    }

    Ok(())
}
