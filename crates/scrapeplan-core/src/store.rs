//! Collaborator interfaces for the category lookup store and the config persister.

use std::convert::Infallible;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mappings::CategoryMapping;
use crate::types::ScrapingConfig;
use crate::CoreError;

/// Kind of curated target a mapping row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Community,
    MarketplaceCategory,
    PopularProduct,
    Hashtag,
}

impl TargetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetKind::Community => "community",
            TargetKind::MarketplaceCategory => "marketplace_category",
            TargetKind::PopularProduct => "popular_product",
            TargetKind::Hashtag => "hashtag",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "community" => Ok(TargetKind::Community),
            "marketplace_category" => Ok(TargetKind::MarketplaceCategory),
            "popular_product" => Ok(TargetKind::PopularProduct),
            "hashtag" => Ok(TargetKind::Hashtag),
            other => Err(CoreError::UnknownTargetKind(other.to_string())),
        }
    }
}

/// Read-only lookup from category/subcategory to curated platform targets.
///
/// An empty result or an error are both expected outcomes; resolvers fall
/// back to static tables in either case.
pub trait CategoryMappingStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Targets of `kind` whose category equals `category` OR whose
    /// subcategory equals `subcategory`. Empty keys never match.
    ///
    /// Groups matched by category come before groups matched only by
    /// subcategory. Groups then order by `(category, subcategory)` bytewise,
    /// and values by their curated position within the group.
    fn lookup(
        &self,
        kind: TargetKind,
        category: &str,
        subcategory: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// A persisted scraping configuration as returned by a [`ConfigPersister`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub id: i64,
    pub public_id: Uuid,
    pub project_id: String,
    pub status: String,
    pub config: serde_json::Value,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Stores a finished [`ScrapingConfig`]. Its failure is the only error the
/// synthesis pipeline propagates.
pub trait ConfigPersister: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn persist(
        &self,
        config: &ScrapingConfig,
        project_id: &str,
    ) -> impl Future<Output = Result<StoredConfig, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MappingEntry {
    kind: TargetKind,
    category: String,
    subcategory: String,
    value: String,
    priority: i32,
}

/// Process-local [`CategoryMappingStore`] for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    entries: Vec<MappingEntry>,
}

impl InMemoryCategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `values` to the `(kind, category, subcategory)` group, ranked in the
    /// given order after anything already in that group.
    #[must_use]
    pub fn with(
        mut self,
        kind: TargetKind,
        category: &str,
        subcategory: &str,
        values: &[&str],
    ) -> Self {
        let in_group = self
            .entries
            .iter()
            .filter(|e| e.kind == kind && e.category == category && e.subcategory == subcategory)
            .count();
        let base = i32::try_from(in_group).unwrap_or(i32::MAX);
        for (offset, value) in values.iter().enumerate() {
            let offset = i32::try_from(offset).unwrap_or(i32::MAX);
            self.entries.push(MappingEntry {
                kind,
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                value: (*value).to_string(),
                priority: base.saturating_add(offset),
            });
        }
        self
    }

    /// Registers every curated group, keyed by its lowercased category and
    /// subcategory.
    #[must_use]
    pub fn from_mappings(mappings: &[CategoryMapping]) -> Self {
        mappings.iter().fold(Self::new(), |store, mapping| {
            let (category, subcategory) = mapping.keys();
            let values: Vec<&str> = mapping.values.iter().map(|v| v.trim()).collect();
            store.with(mapping.kind, &category, &subcategory, &values)
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CategoryMappingStore for InMemoryCategoryStore {
    type Error = Infallible;

    async fn lookup(
        &self,
        kind: TargetKind,
        category: &str,
        subcategory: &str,
    ) -> Result<Vec<String>, Self::Error> {
        let by_category = |e: &MappingEntry| !category.is_empty() && e.category == category;
        let mut matches: Vec<&MappingEntry> = self
            .entries
            .iter()
            .filter(|e| {
                e.kind == kind
                    && (by_category(*e) || (!subcategory.is_empty() && e.subcategory == subcategory))
            })
            .collect();
        matches.sort_by(|a, b| {
            by_category(*b)
                .cmp(&by_category(*a))
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.subcategory.cmp(&b.subcategory))
                .then_with(|| a.priority.cmp(&b.priority))
                .then_with(|| a.value.cmp(&b.value))
        });
        Ok(matches.into_iter().map(|e| e.value.clone()).collect())
    }
}
