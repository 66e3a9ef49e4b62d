use scrapeplan_core::types::HASHTAG_CAP;
use scrapeplan_core::{CategoryMappingStore, Platform, PlatformFamily, PlatformTarget, TargetKind};

use super::tables::{
    entries, GENERAL_HASHTAGS, GLOBAL_TRENDING_HASHTAGS, HASHTAGS_BY_CATEGORY,
    HASHTAGS_BY_SUBCATEGORY, TRENDING_HASHTAG_COUNT,
};
use super::{curated, dedup_capped, owned};

/// Most curated hashtags taken from the store before merging.
pub const HASHTAG_LOOKUP_CAP: usize = 15;

/// Keyword-derived hashtags added on the static-table path.
const KEYWORD_HASHTAG_LIMIT: usize = 10;

/// `#` followed by the lowercased alphanumeric characters of `raw`.
///
/// Returns `None` when nothing alphanumeric is left.
#[must_use]
pub fn to_hashtag(raw: &str) -> Option<String> {
    let body: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    (!body.is_empty()).then(|| format!("#{body}"))
}

/// Resolves hashtags for the selected social platforms.
///
/// `platforms` is the full normalized selection; only social platforms are
/// recorded on the target.
pub async fn resolve<S: CategoryMappingStore>(
    store: &S,
    category: &str,
    subcategory: &str,
    keywords: &[String],
    platforms: &[Platform],
) -> PlatformTarget {
    let mut hashtags = curated(
        store,
        TargetKind::Hashtag,
        category,
        subcategory,
        HASHTAG_LOOKUP_CAP,
    )
    .await;

    if hashtags.is_empty() {
        hashtags.extend(owned(entries(HASHTAGS_BY_CATEGORY, category)));
        hashtags.extend(owned(entries(HASHTAGS_BY_SUBCATEGORY, subcategory)));
        hashtags.extend(
            keywords
                .iter()
                .filter_map(|k| to_hashtag(k))
                .take(KEYWORD_HASHTAG_LIMIT),
        );
        hashtags.extend(owned(GLOBAL_TRENDING_HASHTAGS).take(TRENDING_HASHTAG_COUNT));
    }

    hashtags.extend(owned(GENERAL_HASHTAGS));

    PlatformTarget::Social {
        platforms: platforms
            .iter()
            .filter(|p| p.family() == Some(PlatformFamily::Social))
            .map(|p| p.as_str().to_string())
            .collect(),
        hashtags: dedup_capped(hashtags.iter().filter_map(|t| to_hashtag(t)), HASHTAG_CAP),
    }
}
