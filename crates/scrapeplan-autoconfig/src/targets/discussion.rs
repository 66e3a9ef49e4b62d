use scrapeplan_core::types::COMMUNITY_CAP;
use scrapeplan_core::{CategoryMappingStore, PlatformTarget, TargetAudience, TargetKind};

use super::tables::{
    entries, COMMUNITIES_BY_CATEGORY, COMMUNITIES_BY_GENDER, COMMUNITIES_BY_SUBCATEGORY,
    GENERAL_COMMUNITIES,
};
use super::{curated, dedup_capped, owned};

/// Most curated communities taken from the store before merging.
pub const COMMUNITY_LOOKUP_CAP: usize = 20;

/// Resolves discussion communities for a category and subcategory.
///
/// `category` and `subcategory` are expected lowercased. Audience gender only
/// contributes on the static-table path.
pub async fn resolve<S: CategoryMappingStore>(
    store: &S,
    category: &str,
    subcategory: &str,
    audience: &TargetAudience,
) -> PlatformTarget {
    let mut communities = curated(
        store,
        TargetKind::Community,
        category,
        subcategory,
        COMMUNITY_LOOKUP_CAP,
    )
    .await;

    if communities.is_empty() {
        communities.extend(owned(entries(COMMUNITIES_BY_CATEGORY, category)));
        communities.extend(owned(entries(COMMUNITIES_BY_SUBCATEGORY, subcategory)));
        if let Some(gender) = audience.narrowing_gender() {
            communities.extend(owned(entries(COMMUNITIES_BY_GENDER, gender_key(&gender))));
        }
    }

    communities.extend(owned(GENERAL_COMMUNITIES));

    PlatformTarget::Discussion {
        communities: dedup_capped(
            communities.iter().map(String::as_str).map(community_name),
            COMMUNITY_CAP,
        ),
    }
}

fn gender_key(gender: &str) -> &str {
    match gender {
        "female" | "women" | "woman" => "female",
        "male" | "men" | "man" => "male",
        other => other,
    }
}

/// Strips a leading `r/` or `/r/` so curated and static names compare equal.
fn community_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("/r/")
        .or_else(|| trimmed.strip_prefix("r/"))
        .unwrap_or(trimmed)
        .to_string()
}
