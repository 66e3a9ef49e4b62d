mod configs;
mod db;
mod generate;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::configs::ConfigsCommands;
use crate::db::DbCommands;
use crate::generate::GenerateArgs;

/// Curated mappings shipped with the repository.
pub(crate) const DEFAULT_MAPPINGS_PATH: &str = "config/category_mappings.yaml";

#[derive(Debug, Parser)]
#[command(name = "scrapeplan")]
#[command(about = "Synthesize multi-platform scraping configurations from a product brief")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize a scraping config from a brief and store it
    Generate {
        /// Path to the brief (YAML or JSON)
        #[arg(long)]
        brief: PathBuf,
        /// Project the stored config belongs to
        #[arg(long, default_value = "default")]
        project_id: String,
        /// Print the config without storing it
        #[arg(long)]
        dry_run: bool,
        /// Use the mappings file instead of Postgres and skip the generative service
        #[arg(long)]
        offline: bool,
        /// Mappings file used by --offline
        #[arg(long, default_value = DEFAULT_MAPPINGS_PATH)]
        mappings: PathBuf,
    },
    /// Run only the keyword cascade for a brief
    Keywords {
        /// Path to the brief (YAML or JSON)
        #[arg(long)]
        brief: PathBuf,
        /// Number of keywords to request (defaults to SCRAPEPLAN_KEYWORD_COUNT)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect stored scraping configs
    Configs {
        #[command(subcommand)]
        command: ConfigsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = scrapeplan_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Generate {
            brief,
            project_id,
            dry_run,
            offline,
            mappings,
        }) => {
            let args = GenerateArgs {
                brief: &brief,
                project_id: &project_id,
                dry_run,
                offline,
                mappings: &mappings,
            };
            generate::run_generate(&config, &args).await?;
        }
        Some(Commands::Keywords { brief, count }) => {
            generate::run_keywords(&config, &brief, count).await?;
        }
        Some(Commands::Db { command }) => db::run_db(&config, command).await?,
        Some(Commands::Configs { command }) => configs::run_configs(&config, command).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
