//! Platform target resolution.
//!
//! Every resolver first asks the [`CategoryMappingStore`], then falls back to
//! the static tables in [`tables`] when the store returns nothing or errors.
//! Resolvers never fail; the worst case is a target holding only general
//! fallback entries.

pub mod discussion;
pub mod marketplace;
pub mod social;
pub(crate) mod tables;

use std::collections::HashSet;

use scrapeplan_core::{CategoryMappingStore, TargetKind};

pub use marketplace::extract_product_id;

/// Lowercased, trimmed lookup key.
#[must_use]
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Step A: curated targets from the store, capped. Misses and errors both
/// come back empty.
pub(crate) async fn curated<S: CategoryMappingStore>(
    store: &S,
    kind: TargetKind,
    category: &str,
    subcategory: &str,
    cap: usize,
) -> Vec<String> {
    match store.lookup(kind, category, subcategory).await {
        Ok(mut values) => {
            if values.is_empty() {
                tracing::debug!(kind = %kind, category, subcategory, "no curated mappings");
            }
            values.truncate(cap);
            values
        }
        Err(e) => {
            tracing::warn!(
                kind = %kind,
                category,
                subcategory,
                error = %e,
                "category mapping lookup failed, using static tables"
            );
            Vec::new()
        }
    }
}

/// Exact-match dedup keeping first occurrences, dropping blanks, then
/// truncating. Kept entries are returned unmodified.
pub(crate) fn dedup_capped<I>(entries: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| !e.trim().is_empty())
        .filter(|e| seen.insert(e.clone()))
        .take(cap)
        .collect()
}

pub(crate) fn owned<'a>(values: &'a [&str]) -> impl Iterator<Item = String> + 'a {
    values.iter().map(|v| (*v).to_string())
}
