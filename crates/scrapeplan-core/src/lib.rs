//! Shared domain types, collaborator traits, and configuration for scrapeplan.

pub mod app_config;
pub mod brief;
pub mod config;
pub mod mappings;
pub mod store;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brief::{load_brief, Platform, PlatformFamily, PlatformSelection, ProjectBrief, TargetAudience};
pub use config::{load_app_config, load_app_config_from_env};
pub use mappings::{load_category_mappings, CategoryMapping, MappingsFile};
pub use store::{CategoryMappingStore, ConfigPersister, InMemoryCategoryStore, StoredConfig, TargetKind};
pub use types::{
    ConfigStatus, DiscussionFilters, FilterPolicy, KeywordSet, KeywordSource,
    MarketAnalysisFilters, MarketplaceFilters, PlatformConfig, PlatformTarget, ScrapingConfig,
    SocialFilters, SortOrder, TimeWindow,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brief file {path}: {source}")]
    BriefFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brief file: {0}")]
    BriefFileParse(#[from] serde_yaml::Error),

    #[error("failed to read category mappings file {path}: {source}")]
    MappingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse category mappings file: {0}")]
    MappingsFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown target kind: {0}")]
    UnknownTargetKind(String),

    #[error("unknown config status: {0}")]
    UnknownStatus(String),
}
