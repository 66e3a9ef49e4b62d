//! End-to-end configuration synthesis for a single brief.

use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::panic::AssertUnwindSafe;

use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use scrapeplan_core::{
    CategoryMappingStore, ConfigPersister, ConfigStatus, Platform, PlatformConfig, PlatformFamily,
    ProjectBrief, ScrapingConfig, StoredConfig,
};
use scrapeplan_keywords::{KeywordGenerator, KeywordOptions, KeywordSynthesizer};

use crate::builder::{build, generic_config, market_analysis_target};
use crate::error::AutoConfigError;
use crate::targets::marketplace::ExplicitProducts;
use crate::targets::{discussion, marketplace, normalize_key, social};

/// Drives keyword synthesis, per-platform target resolution, and assembly.
///
/// Holds no per-request state, so one orchestrator can serve concurrent
/// requests behind an `Arc`.
pub struct ConfigOrchestrator<S, G> {
    store: S,
    synthesizer: KeywordSynthesizer<G>,
    options: KeywordOptions,
}

/// Inputs shared by every platform branch of one request.
struct BranchContext<'a> {
    brief: &'a ProjectBrief,
    category: String,
    subcategory: String,
    keywords: &'a [String],
    platforms: &'a [Platform],
}

impl<S, G> ConfigOrchestrator<S, G>
where
    S: CategoryMappingStore,
    G: KeywordGenerator,
{
    #[must_use]
    pub fn new(store: S, synthesizer: KeywordSynthesizer<G>) -> Self {
        Self {
            store,
            synthesizer,
            options: KeywordOptions::default(),
        }
    }

    /// Overrides how many keywords are requested from the synthesizer.
    #[must_use]
    pub fn with_keyword_count(mut self, count: usize) -> Self {
        self.options.count = count;
        self
    }

    #[must_use]
    pub fn with_keyword_options(mut self, options: KeywordOptions) -> Self {
        self.options = options;
        self
    }

    /// Synthesizes a configuration for every selected platform.
    ///
    /// Never fails. A platform whose branch errors or panics receives
    /// [`generic_config`] and the remaining platforms are unaffected.
    pub async fn generate_auto_config(&self, brief: &ProjectBrief) -> ScrapingConfig {
        let platforms = brief.selected_platforms();
        let keyword_set = self.synthesizer.generate(brief, &self.options).await;
        let keyword_source = keyword_set.source();
        let keyword_confidence = keyword_set.confidence();
        let keywords = merge_seed_keywords(keyword_set.into_terms(), &brief.seed_keywords);

        let context = BranchContext {
            brief,
            category: normalize_key(&brief.category),
            subcategory: normalize_key(&brief.subcategory),
            keywords: &keywords,
            platforms: &platforms,
        };

        let branches = platforms.iter().map(|&platform| {
            AssertUnwindSafe(self.configure_platform(platform, &context))
                .catch_unwind()
                .map(move |outcome| (platform, outcome))
        });

        let mut configs = BTreeMap::new();
        for (platform, outcome) in join_all(branches).await {
            let config = match outcome {
                Ok(Ok(config)) => config,
                Ok(Err(e)) => {
                    tracing::warn!(
                        platform = %platform,
                        error = %e,
                        "platform configuration failed, using generic config"
                    );
                    generic_config(platform, &keywords, &brief.geographic_focus)
                }
                Err(payload) => {
                    tracing::warn!(
                        platform = %platform,
                        panic = %panic_message(payload.as_ref()),
                        "platform configuration panicked, using generic config"
                    );
                    generic_config(platform, &keywords, &brief.geographic_focus)
                }
            };
            configs.insert(platform.as_str().to_string(), config);
        }

        tracing::info!(
            platforms = configs.len(),
            keywords = keywords.len(),
            keyword_source = %keyword_source,
            keyword_confidence,
            "scraping config assembled"
        );

        ScrapingConfig {
            keywords,
            keyword_source,
            keyword_confidence,
            platforms: configs,
            generated_at: Utc::now(),
            status: ConfigStatus::Pending,
        }
    }

    /// Synthesizes a configuration and stores it through `persister`.
    ///
    /// # Errors
    ///
    /// Returns [`AutoConfigError::Persist`] if the persister fails. Synthesis
    /// itself cannot fail.
    pub async fn generate_and_persist<P: ConfigPersister>(
        &self,
        brief: &ProjectBrief,
        project_id: &str,
        persister: &P,
    ) -> Result<StoredConfig, AutoConfigError> {
        let config = self.generate_auto_config(brief).await;
        persister
            .persist(&config, project_id)
            .await
            .map_err(|e| AutoConfigError::Persist(Box::new(e)))
    }

    async fn configure_platform(
        &self,
        platform: Platform,
        ctx: &BranchContext<'_>,
    ) -> Result<PlatformConfig, AutoConfigError> {
        let (category, subcategory) = (ctx.category.as_str(), ctx.subcategory.as_str());
        let target = match platform.family() {
            Some(PlatformFamily::Discussion) => {
                discussion::resolve(
                    &self.store,
                    category,
                    subcategory,
                    &ctx.brief.target_audience,
                )
                .await
            }
            Some(PlatformFamily::Marketplace) => {
                marketplace::resolve(
                    &self.store,
                    category,
                    subcategory,
                    ExplicitProducts {
                        product_url: ctx.brief.product_url.as_deref(),
                        competitor_urls: &ctx.brief.competitor_urls,
                    },
                )
                .await
            }
            Some(PlatformFamily::Social) => {
                social::resolve(&self.store, category, subcategory, ctx.keywords, ctx.platforms)
                    .await
            }
            None => market_analysis_target(ctx.brief),
        };

        tracing::debug!(platform = %platform, "platform target resolved");
        build(platform, ctx.brief, ctx.keywords, target)
    }
}

/// Synthesized terms first, then caller seeds. Case-sensitive, blanks dropped.
fn merge_seed_keywords(terms: Vec<String>, seeds: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .chain(seeds.iter().map(|s| s.trim().to_string()))
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
