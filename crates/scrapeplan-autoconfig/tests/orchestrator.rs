use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use scrapeplan_autoconfig::{extract_product_id, AutoConfigError, ConfigOrchestrator};
use scrapeplan_core::types::{
    COMMUNITY_CAP, HASHTAG_CAP, MARKETPLACE_CATEGORY_CAP, MARKETPLACE_PRODUCT_CAP,
};
use scrapeplan_core::{
    CategoryMappingStore, ConfigPersister, ConfigStatus, InMemoryCategoryStore, KeywordSource,
    Platform, PlatformSelection, PlatformTarget, ProjectBrief, ScrapingConfig, StoredConfig,
    TargetAudience, TargetKind,
};
use scrapeplan_keywords::{
    GenerationRequest, GenerationResponse, GenerationSettings, KeywordError, KeywordGenerator,
    KeywordSynthesizer,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Fails the first `fail_first` calls, then answers with a fixed list.
struct ScriptedGenerator {
    fail_first: u32,
    calls: AtomicU32,
}

impl ScriptedGenerator {
    fn new(fail_first: u32) -> Self {
        Self {
            fail_first,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeywordGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, KeywordError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.fail_first {
            return Err(KeywordError::Api {
                status: 400,
                message: "model not found".to_string(),
            });
        }
        Ok(GenerationResponse {
            text: "1. cork yoga mat\n2. eco friendly yoga mat\n3. yoga mat for hot yoga".to_string(),
        })
    }
}

struct ErroringStore;

impl CategoryMappingStore for ErroringStore {
    type Error = std::io::Error;

    async fn lookup(
        &self,
        _kind: TargetKind,
        _category: &str,
        _subcategory: &str,
    ) -> Result<Vec<String>, Self::Error> {
        Err(std::io::Error::other("connection reset by peer"))
    }
}

/// Panics on hashtag lookups, answers every other kind with nothing.
struct HashtagPanicStore;

impl CategoryMappingStore for HashtagPanicStore {
    type Error = std::io::Error;

    async fn lookup(
        &self,
        kind: TargetKind,
        _category: &str,
        _subcategory: &str,
    ) -> Result<Vec<String>, Self::Error> {
        assert!(kind != TargetKind::Hashtag, "hashtag index corrupted");
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct MemoryPersister {
    saved: Mutex<Vec<(String, ScrapingConfig)>>,
}

impl ConfigPersister for MemoryPersister {
    type Error = std::io::Error;

    async fn persist(
        &self,
        config: &ScrapingConfig,
        project_id: &str,
    ) -> Result<StoredConfig, Self::Error> {
        let mut saved = self.saved.lock().unwrap();
        saved.push((project_id.to_string(), config.clone()));
        Ok(StoredConfig {
            id: i64::try_from(saved.len()).unwrap(),
            public_id: Uuid::new_v4(),
            project_id: project_id.to_string(),
            status: config.status.as_str().to_string(),
            config: serde_json::to_value(config).unwrap(),
            generated_at: config.generated_at,
            created_at: Utc::now(),
        })
    }
}

struct FailingPersister;

impl ConfigPersister for FailingPersister {
    type Error = std::io::Error;

    async fn persist(
        &self,
        _config: &ScrapingConfig,
        _project_id: &str,
    ) -> Result<StoredConfig, Self::Error> {
        Err(std::io::Error::other("disk full"))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn yoga_brief() -> ProjectBrief {
    ProjectBrief {
        description: "Eco-friendly yoga mat made from natural cork with alignment lines"
            .to_string(),
        category: "Fitness".to_string(),
        subcategory: "Yoga".to_string(),
        target_audience: TargetAudience {
            gender: Some("female".to_string()),
            age_range: Some("25-40".to_string()),
            interests: vec!["wellness".to_string()],
        },
        geographic_focus: "United States".to_string(),
        competitors: vec!["Manduka".to_string(), "Lululemon".to_string()],
        ..ProjectBrief::default()
    }
}

fn with_all_platforms(mut brief: ProjectBrief) -> ProjectBrief {
    brief.platform_selection = Some(PlatformSelection::List(
        Platform::ALL.iter().map(|p| p.as_str().to_string()).collect(),
    ));
    brief
}

fn offline() -> ConfigOrchestrator<InMemoryCategoryStore, ScriptedGenerator> {
    ConfigOrchestrator::new(
        InMemoryCategoryStore::new(),
        KeywordSynthesizer::rule_based_only(),
    )
}

fn with_generator<S: CategoryMappingStore>(
    store: S,
    generator: Arc<ScriptedGenerator>,
) -> ConfigOrchestrator<S, Arc<ScriptedGenerator>> {
    ConfigOrchestrator::new(
        store,
        KeywordSynthesizer::new(Some(generator), GenerationSettings::default()),
    )
}

fn keys(config: &ScrapingConfig) -> Vec<&str> {
    config.platforms.keys().map(String::as_str).collect()
}

fn assert_unique(items: &[String]) {
    let unique: HashSet<&String> = items.iter().collect();
    assert_eq!(unique.len(), items.len(), "duplicates in {items:?}");
}

// ---------------------------------------------------------------------------
// Platform selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_enabled_flag_yields_one_platform() {
    let mut brief = yoga_brief();
    brief.platform_selection = Some(PlatformSelection::Flags(BTreeMap::from([
        ("reddit".to_string(), true),
        ("amazon".to_string(), false),
        ("instagram".to_string(), false),
        ("tiktok".to_string(), false),
        ("market_analysis".to_string(), false),
    ])));

    let config = offline().generate_auto_config(&brief).await;
    assert_eq!(keys(&config), vec!["reddit"]);
}

#[tokio::test]
async fn list_and_flag_selections_produce_the_same_keys() {
    let mut from_list = yoga_brief();
    from_list.platform_selection =
        Some(PlatformSelection::List(vec!["tiktok".to_string(), "amazon".to_string()]));

    let mut from_flags = yoga_brief();
    from_flags.platform_selection = Some(PlatformSelection::Flags(BTreeMap::from([
        ("amazon".to_string(), true),
        ("tiktok".to_string(), true),
        ("reddit".to_string(), false),
    ])));

    let orchestrator = offline();
    let a = orchestrator.generate_auto_config(&from_list).await;
    let b = orchestrator.generate_auto_config(&from_flags).await;
    assert_eq!(keys(&a), keys(&b));
    assert_eq!(keys(&a), vec!["amazon", "tiktok"]);
}

#[tokio::test]
async fn missing_selection_uses_default_platforms() {
    let config = offline().generate_auto_config(&yoga_brief()).await;
    assert_eq!(keys(&config), vec!["amazon", "instagram", "reddit", "tiktok"]);
}

#[tokio::test]
async fn all_disabled_flags_configure_no_platforms() {
    let mut brief = yoga_brief();
    brief.platform_selection = Some(PlatformSelection::Flags(BTreeMap::from([
        ("reddit".to_string(), false),
        ("amazon".to_string(), false),
        ("instagram".to_string(), false),
        ("tiktok".to_string(), false),
        ("market_analysis".to_string(), false),
    ])));

    let config = offline().generate_auto_config(&brief).await;
    assert!(config.platforms.is_empty());
    assert!(!config.keywords.is_empty());
}

#[tokio::test]
async fn unknown_only_list_configures_no_platforms() {
    let mut brief = yoga_brief();
    brief.platform_selection = Some(PlatformSelection::List(vec!["twitter".to_string()]));

    let config = offline().generate_auto_config(&brief).await;
    assert!(config.platforms.is_empty());
}

// ---------------------------------------------------------------------------
// Keyword tiers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn always_failing_generator_degrades_but_stays_pending() {
    let generator = Arc::new(ScriptedGenerator::new(u32::MAX));
    let config = with_generator(InMemoryCategoryStore::new(), Arc::clone(&generator))
        .generate_auto_config(&yoga_brief())
        .await;

    assert!(matches!(
        config.keyword_source,
        KeywordSource::RuleBased | KeywordSource::Minimal
    ));
    assert_eq!(config.keyword_confidence, config.keyword_source.confidence());
    assert_eq!(config.status, ConfigStatus::Pending);
    assert!(!config.keywords.is_empty());
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn fail_then_succeed_generator_is_not_cached() {
    let generator = Arc::new(ScriptedGenerator::new(1));
    let orchestrator = with_generator(InMemoryCategoryStore::new(), Arc::clone(&generator));

    let first = orchestrator.generate_auto_config(&yoga_brief()).await;
    let second = orchestrator.generate_auto_config(&yoga_brief()).await;

    assert_eq!(first.keyword_source, KeywordSource::SimplifiedGenerative);
    assert_eq!(second.keyword_source, KeywordSource::PrimaryGenerative);
    assert!((second.keyword_confidence - 0.9).abs() < f32::EPSILON);
    assert_eq!(second.keywords[0], "cork yoga mat");
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn seed_keywords_are_appended_after_synthesized_terms() {
    let mut brief = yoga_brief();
    brief.seed_keywords = vec!["cork yoga mat".to_string(), "manduka prolite".to_string()];

    let config = with_generator(
        InMemoryCategoryStore::new(),
        Arc::new(ScriptedGenerator::new(0)),
    )
    .with_keyword_count(5)
    .generate_auto_config(&brief)
    .await;

    assert_eq!(config.keywords.len(), 6);
    assert_eq!(config.keywords.last().unwrap(), "manduka prolite");
    assert_unique(&config.keywords);
    for platform in config.platforms.values() {
        assert_eq!(platform.keywords, config.keywords);
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

#[test]
fn product_id_extraction_needs_the_marketplace_domain() {
    assert_eq!(
        extract_product_id("https://www.amazon.com/Cork-Yoga-Mat/dp/B07XQXZXJC?th=1").as_deref(),
        Some("B07XQXZXJC")
    );
    assert_eq!(extract_product_id("https://example.com/dp/B07XQXZXJC"), None);
}

#[tokio::test]
async fn marketplace_target_carries_the_explicit_product() {
    let mut brief = yoga_brief();
    brief.platform_selection = Some(PlatformSelection::List(vec!["amazon".to_string()]));
    brief.product_url = Some("https://www.amazon.com/dp/B07XQXZXJC".to_string());

    let config = offline().generate_auto_config(&brief).await;
    let PlatformTarget::Marketplace {
        products,
        product_id,
        ..
    } = &config.platform(Platform::Amazon).unwrap().target
    else {
        panic!("amazon should have a marketplace target");
    };
    assert_eq!(product_id.as_deref(), Some("B07XQXZXJC"));
    assert_eq!(products[0], "https://www.amazon.com/dp/B07XQXZXJC");
}

#[tokio::test]
async fn erroring_store_falls_back_to_static_tables_everywhere() {
    let brief = with_all_platforms(yoga_brief());
    let config = with_generator(ErroringStore, Arc::new(ScriptedGenerator::new(0)))
        .generate_auto_config(&brief)
        .await;

    assert_eq!(config.platforms.len(), Platform::ALL.len());

    let reddit = &config.platform(Platform::Reddit).unwrap().target;
    let PlatformTarget::Discussion { communities } = reddit else {
        panic!("unexpected reddit target {reddit:?}");
    };
    assert!(communities.contains(&"Fitness".to_string()));
    assert!(communities.contains(&"yoga".to_string()));
    assert!(communities.contains(&"TwoXChromosomes".to_string()));

    let amazon = &config.platform(Platform::Amazon).unwrap().target;
    let PlatformTarget::Marketplace { categories, .. } = amazon else {
        panic!("unexpected amazon target {amazon:?}");
    };
    assert_eq!(categories[0], "Sports & Outdoors");

    let instagram = &config.platform(Platform::Instagram).unwrap().target;
    let PlatformTarget::Social { hashtags, .. } = instagram else {
        panic!("unexpected instagram target {instagram:?}");
    };
    assert!(hashtags.contains(&"#yogapractice".to_string()));
    assert!(hashtags.contains(&"#corkyogamat".to_string()));
}

#[tokio::test]
async fn curated_mappings_take_precedence() {
    let store = InMemoryCategoryStore::new()
        .with(TargetKind::Community, "fitness", "", &["r/homegym"])
        .with(TargetKind::Hashtag, "", "yoga", &["#yogaeveryday"]);
    let mut brief = yoga_brief();
    brief.platform_selection =
        Some(PlatformSelection::List(vec!["reddit".to_string(), "instagram".to_string()]));

    let config = ConfigOrchestrator::new(store, KeywordSynthesizer::<ScriptedGenerator>::rule_based_only())
        .generate_auto_config(&brief)
        .await;

    let PlatformTarget::Discussion { communities } =
        &config.platform(Platform::Reddit).unwrap().target
    else {
        panic!("reddit should have a discussion target");
    };
    assert_eq!(communities[0], "homegym");
    assert!(!communities.contains(&"TwoXChromosomes".to_string()));

    let PlatformTarget::Social { hashtags, platforms } =
        &config.platform(Platform::Instagram).unwrap().target
    else {
        panic!("instagram should have a social target");
    };
    assert_eq!(hashtags[0], "#yogaeveryday");
    assert!(!hashtags.contains(&"#trending".to_string()));
    assert_eq!(platforms, &vec!["instagram".to_string()]);
}

#[tokio::test]
async fn market_analysis_uses_brief_sectors_and_competitors() {
    let mut brief = yoga_brief();
    brief.platform_selection = Some(PlatformSelection::List(vec!["market analysis".to_string()]));

    let config = offline().generate_auto_config(&brief).await;
    let analysis = config.platform(Platform::MarketAnalysis).unwrap();
    assert_eq!(
        analysis.target,
        PlatformTarget::MarketAnalysis {
            sectors: vec!["Fitness".to_string()],
            subsectors: vec!["Yoga".to_string()],
            competitors: vec!["Manduka".to_string(), "Lululemon".to_string()],
        }
    );
    assert_eq!(analysis.geographic_focus, "United States");
}

// ---------------------------------------------------------------------------
// Isolation and bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panicking_branch_gets_generic_config_only_for_that_platform() {
    let brief = with_all_platforms(yoga_brief());
    let config = ConfigOrchestrator::new(
        HashtagPanicStore,
        KeywordSynthesizer::<ScriptedGenerator>::rule_based_only(),
    )
    .generate_auto_config(&brief)
    .await;

    assert_eq!(config.platforms.len(), Platform::ALL.len());

    let tiktok = config.platform(Platform::Tiktok).unwrap();
    assert_eq!(
        tiktok.target,
        PlatformTarget::Social {
            platforms: vec!["tiktok".to_string()],
            hashtags: vec!["#productreview".to_string(), "#musthave".to_string()],
        }
    );
    assert_eq!(tiktok.keywords, config.keywords);

    let PlatformTarget::Discussion { communities } =
        &config.platform(Platform::Reddit).unwrap().target
    else {
        panic!("reddit should have a discussion target");
    };
    assert!(communities.contains(&"yoga".to_string()));
}

#[tokio::test]
async fn every_list_is_unique_and_within_its_cap() {
    let many: Vec<String> = (0..40).map(|i| format!("value{i}")).collect();
    let refs: Vec<&str> = many.iter().map(String::as_str).collect();
    let store = InMemoryCategoryStore::new()
        .with(TargetKind::Community, "fitness", "", &refs)
        .with(TargetKind::MarketplaceCategory, "fitness", "", &refs)
        .with(TargetKind::PopularProduct, "fitness", "", &refs)
        .with(TargetKind::Hashtag, "fitness", "", &refs);

    let mut brief = with_all_platforms(yoga_brief());
    brief.competitor_urls = (0..8)
        .map(|i| format!("https://www.amazon.com/dp/B00000000{i}"))
        .collect();

    let config = with_generator(store, Arc::new(ScriptedGenerator::new(0)))
        .generate_auto_config(&brief)
        .await;

    assert!(config.keywords.len() <= 30);
    assert_unique(&config.keywords);

    for platform in config.platforms.values() {
        match &platform.target {
            PlatformTarget::Discussion { communities } => {
                assert!(communities.len() <= COMMUNITY_CAP);
                assert_unique(communities);
            }
            PlatformTarget::Marketplace {
                products,
                categories,
                ..
            } => {
                assert!(products.len() <= MARKETPLACE_PRODUCT_CAP);
                assert!(categories.len() <= MARKETPLACE_CATEGORY_CAP);
                assert_unique(products);
                assert_unique(categories);
            }
            PlatformTarget::Social { hashtags, .. } => {
                assert!(hashtags.len() <= HASHTAG_CAP);
                assert_unique(hashtags);
            }
            PlatformTarget::MarketAnalysis { competitors, .. } => assert_unique(competitors),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_and_persist_stores_exactly_once() {
    let persister = MemoryPersister::default();
    let stored = offline()
        .generate_and_persist(&yoga_brief(), "proj-42", &persister)
        .await
        .unwrap();

    assert_eq!(stored.project_id, "proj-42");
    assert_eq!(stored.status, "pending");
    assert_eq!(stored.config["keyword_source"], "rule_based");

    let saved = persister.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "proj-42");
}

#[tokio::test]
async fn persistence_failure_is_the_only_error() {
    let err = offline()
        .generate_and_persist(&yoga_brief(), "proj-42", &FailingPersister)
        .await
        .unwrap_err();

    assert!(matches!(err, AutoConfigError::Persist(_)));
    assert!(err.to_string().contains("disk full"));
}
