use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brief::Platform;
use crate::CoreError;

/// Maximum discussion communities per configuration.
pub const COMMUNITY_CAP: usize = 15;
/// Maximum marketplace categories per configuration.
pub const MARKETPLACE_CATEGORY_CAP: usize = 5;
/// Maximum marketplace products per configuration.
pub const MARKETPLACE_PRODUCT_CAP: usize = 5;
/// Maximum social hashtags per configuration.
pub const HASHTAG_CAP: usize = 20;

/// Which keyword cascade tier produced a [`KeywordSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    PrimaryGenerative,
    SimplifiedGenerative,
    RuleBased,
    Minimal,
}

impl KeywordSource {
    /// Fixed confidence attached to each tier.
    #[must_use]
    pub const fn confidence(self) -> f32 {
        match self {
            KeywordSource::PrimaryGenerative => 0.9,
            KeywordSource::SimplifiedGenerative => 0.7,
            KeywordSource::RuleBased => 0.6,
            KeywordSource::Minimal => 0.3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeywordSource::PrimaryGenerative => "primary_generative",
            KeywordSource::SimplifiedGenerative => "simplified_generative",
            KeywordSource::RuleBased => "rule_based",
            KeywordSource::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for KeywordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked keyword list labeled with the tier that produced it.
///
/// Confidence is derived from `source` at construction and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSet {
    terms: Vec<String>,
    source: KeywordSource,
    confidence: f32,
}

impl KeywordSet {
    /// Builds a set from already-deduplicated, already-truncated terms.
    #[must_use]
    pub fn new(terms: Vec<String>, source: KeywordSource) -> Self {
        Self {
            terms,
            source,
            confidence: source.confidence(),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn source(&self) -> KeywordSource {
        self.source
    }

    #[must_use]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn into_terms(self) -> Vec<String> {
        self.terms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Day,
    Week,
    Month,
    Year,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Top,
    Hot,
    New,
    Relevance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscussionFilters {
    pub time_filter: TimeWindow,
    pub sort: SortOrder,
    pub min_score: u32,
    pub min_comments: u32,
    pub limit_per_community: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceFilters {
    pub min_reviews: u32,
    pub min_rating: f32,
    pub max_rating: f32,
    pub min_review_sample: u32,
    pub verified_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialFilters {
    pub min_likes: u32,
    pub time_window: TimeWindow,
    pub max_posts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarketAnalysisFilters {
    pub include_market_size: bool,
    pub include_growth_trends: bool,
    pub include_competition: bool,
    pub include_pricing: bool,
}

/// Constant scrape constraints selected by platform identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterPolicy {
    Discussion(DiscussionFilters),
    Marketplace(MarketplaceFilters),
    Social(SocialFilters),
    MarketAnalysis(MarketAnalysisFilters),
}

/// Platform-shaped set of scrape targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformTarget {
    Discussion {
        communities: Vec<String>,
    },
    Marketplace {
        products: Vec<String>,
        categories: Vec<String>,
        product_url: Option<String>,
        /// 10-character marketplace identifier extracted from `product_url`.
        product_id: Option<String>,
    },
    Social {
        platforms: Vec<String>,
        hashtags: Vec<String>,
    },
    MarketAnalysis {
        sectors: Vec<String>,
        subsectors: Vec<String>,
        competitors: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub enabled: bool,
    pub target: PlatformTarget,
    pub keywords: Vec<String>,
    pub filters: FilterPolicy,
    pub geographic_focus: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ConfigStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigStatus::Pending => "pending",
            ConfigStatus::Running => "running",
            ConfigStatus::Completed => "completed",
            ConfigStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConfigStatus::Pending),
            "running" => Ok(ConfigStatus::Running),
            "completed" => Ok(ConfigStatus::Completed),
            "failed" => Ok(ConfigStatus::Failed),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

/// Root aggregate produced per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub keywords: Vec<String>,
    pub keyword_source: KeywordSource,
    pub keyword_confidence: f32,
    /// Keyed by [`Platform::as_str`].
    pub platforms: BTreeMap<String, PlatformConfig>,
    pub generated_at: DateTime<Utc>,
    pub status: ConfigStatus,
}

impl ScrapingConfig {
    #[must_use]
    pub fn platform(&self, platform: Platform) -> Option<&PlatformConfig> {
        self.platforms.get(platform.as_str())
    }
}
