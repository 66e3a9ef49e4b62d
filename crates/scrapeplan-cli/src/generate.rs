//! `generate` and `keywords` command handlers.
//!
//! `generate` runs the full orchestrator, against Postgres by default or
//! against the curated mappings file with `--offline`. `keywords` runs only
//! the cascade and never touches the database.

use std::path::Path;

use anyhow::Context;
use scrapeplan_autoconfig::ConfigOrchestrator;
use scrapeplan_core::{load_brief, load_category_mappings, AppConfig, InMemoryCategoryStore};
use scrapeplan_db::{PgCategoryStore, PgConfigPersister};
use scrapeplan_keywords::{
    ChatCompletionsClient, GenerationSettings, KeywordOptions, KeywordSynthesizer,
};

pub(crate) struct GenerateArgs<'a> {
    pub brief: &'a Path,
    pub project_id: &'a str,
    pub dry_run: bool,
    pub offline: bool,
    pub mappings: &'a Path,
}

/// Synthesize a config for the brief at `args.brief`.
///
/// Offline runs never persist. Otherwise the config is stored unless
/// `dry_run` is set.
///
/// # Errors
///
/// Returns an error if the brief or mappings file is invalid, the database
/// is unreachable, or the config cannot be stored.
pub(crate) async fn run_generate(config: &AppConfig, args: &GenerateArgs<'_>) -> anyhow::Result<()> {
    let brief = load_brief(args.brief)
        .with_context(|| format!("loading brief {}", args.brief.display()))?;
    let synthesizer = build_synthesizer(config, args.offline)?;

    if args.offline {
        let store = offline_store(args.mappings)?;
        let orchestrator = ConfigOrchestrator::new(store, synthesizer)
            .with_keyword_count(config.keyword_count);
        let generated = orchestrator.generate_auto_config(&brief).await;
        println!("{}", serde_json::to_string_pretty(&generated)?);
        if !args.dry_run {
            tracing::info!("offline run, config not stored");
        }
        return Ok(());
    }

    let pool = scrapeplan_db::connect_pool_from_config(config).await?;
    let orchestrator = ConfigOrchestrator::new(PgCategoryStore::new(pool.clone()), synthesizer)
        .with_keyword_count(config.keyword_count);

    if args.dry_run {
        let generated = orchestrator.generate_auto_config(&brief).await;
        println!("{}", serde_json::to_string_pretty(&generated)?);
        return Ok(());
    }

    let stored = orchestrator
        .generate_and_persist(&brief, args.project_id, &PgConfigPersister::new(pool))
        .await?;
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

/// Run only the keyword cascade and print the resulting set.
///
/// # Errors
///
/// Returns an error if the brief is invalid or the generative client cannot
/// be constructed.
pub(crate) async fn run_keywords(
    config: &AppConfig,
    brief_path: &Path,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let brief = load_brief(brief_path)
        .with_context(|| format!("loading brief {}", brief_path.display()))?;
    let synthesizer = build_synthesizer(config, false)?;

    let options = KeywordOptions {
        count: count.unwrap_or(config.keyword_count),
        ..KeywordOptions::default()
    };
    let set = synthesizer.generate(&brief, &options).await;
    println!("{}", serde_json::to_string_pretty(&set)?);
    Ok(())
}

fn build_synthesizer(
    config: &AppConfig,
    offline: bool,
) -> anyhow::Result<KeywordSynthesizer<ChatCompletionsClient>> {
    let settings = GenerationSettings::from_app_config(config);

    let generator = match config.llm_api_key.as_deref() {
        Some(key) if !offline && config.has_llm_credential() => Some(
            ChatCompletionsClient::with_base_url(key, config.llm_timeout_secs, &config.llm_base_url)
                .context("building chat completions client")?,
        ),
        _ => {
            tracing::info!(offline, "no generative client, keywords start at the rule-based tier");
            None
        }
    };

    Ok(KeywordSynthesizer::new(generator, settings))
}

/// In-memory store seeded from `path`. A missing file yields an empty store,
/// so every resolver falls back to its static tables.
fn offline_store(path: &Path) -> anyhow::Result<InMemoryCategoryStore> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "mappings file not found, using static tables only");
        return Ok(InMemoryCategoryStore::new());
    }

    let file = load_category_mappings(path)?;
    let store = InMemoryCategoryStore::from_mappings(&file.mappings);
    tracing::debug!(rows = store.len(), "loaded curated mappings");
    Ok(store)
}
