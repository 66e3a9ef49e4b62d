//! Offline unit tests for scrapeplan-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::collections::BTreeMap;

use chrono::Utc;
use scrapeplan_core::{
    AppConfig, ConfigStatus, Environment, KeywordSource, ScrapingConfig, StoredConfig,
};
use scrapeplan_db::{PoolConfig, ScrapingConfigRow};
use uuid::Uuid;

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        database_url: Some("postgres://example".to_string()),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        llm_api_key: None,
        llm_base_url: "https://api.openai.com/v1".to_string(),
        llm_model: "gpt-4o-mini".to_string(),
        llm_max_tokens: 500,
        llm_temperature: 0.7,
        llm_timeout_secs: 30,
        llm_max_retries: 1,
        keyword_count: 30,
    }
}

fn scraping_config() -> ScrapingConfig {
    ScrapingConfig {
        keywords: vec!["cork yoga mat".to_string()],
        keyword_source: KeywordSource::RuleBased,
        keyword_confidence: KeywordSource::RuleBased.confidence(),
        platforms: BTreeMap::new(),
        generated_at: Utc::now(),
        status: ConfigStatus::Pending,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout, std::time::Duration::from_secs(9));
}

#[test]
fn scraping_config_row_decodes_and_converts() {
    let config = scraping_config();
    let row = ScrapingConfigRow {
        id: 3,
        public_id: Uuid::new_v4(),
        project_id: "proj-1".to_string(),
        status: "pending".to_string(),
        keyword_source: "rule_based".to_string(),
        keyword_confidence: 0.6,
        config: serde_json::to_value(&config).unwrap(),
        generated_at: config.generated_at,
        created_at: Utc::now(),
    };

    let decoded = row.decode().expect("stored document should decode");
    assert_eq!(decoded, config);

    let public_id = row.public_id;
    let stored: StoredConfig = row.into();
    assert_eq!(stored.id, 3);
    assert_eq!(stored.public_id, public_id);
    assert_eq!(stored.project_id, "proj-1");
    assert_eq!(stored.config["keyword_source"], "rule_based");
}

#[test]
fn decode_rejects_foreign_documents() {
    let row = ScrapingConfigRow {
        id: 1,
        public_id: Uuid::new_v4(),
        project_id: "proj-1".to_string(),
        status: "pending".to_string(),
        keyword_source: "minimal".to_string(),
        keyword_confidence: 0.3,
        config: serde_json::json!({ "unexpected": true }),
        generated_at: Utc::now(),
        created_at: Utc::now(),
    };
    assert!(row.decode().is_err());
}
