//! Assembles per-platform configs from a resolved target and the shared
//! keyword list.

use scrapeplan_core::{Platform, PlatformConfig, PlatformFamily, PlatformTarget, ProjectBrief};

use crate::error::AutoConfigError;
use crate::filters::filter_policy;
use crate::targets::{dedup_capped, owned};
use crate::targets::tables::{GENERAL_COMMUNITIES, GENERAL_HASHTAGS, GENERAL_MARKETPLACE_CATEGORIES};

/// Wraps `target` with the platform's filter policy.
///
/// # Errors
///
/// Returns [`AutoConfigError::TargetMismatch`] if `target` is not the shape
/// `platform` expects.
pub fn build(
    platform: Platform,
    brief: &ProjectBrief,
    keywords: &[String],
    target: PlatformTarget,
) -> Result<PlatformConfig, AutoConfigError> {
    let found = target_kind(&target);
    if found != expected_kind(platform) {
        return Err(AutoConfigError::TargetMismatch { platform, found });
    }

    Ok(PlatformConfig {
        enabled: true,
        target,
        keywords: keywords.to_vec(),
        filters: filter_policy(platform),
        geographic_focus: brief.geographic_focus.clone(),
    })
}

/// Market analysis has no lookup step; its target comes straight from the brief.
#[must_use]
pub fn market_analysis_target(brief: &ProjectBrief) -> PlatformTarget {
    PlatformTarget::MarketAnalysis {
        sectors: dedup_capped([brief.category.trim().to_string()], 1),
        subsectors: dedup_capped([brief.subcategory.trim().to_string()], 1),
        competitors: dedup_capped(
            brief.competitors.iter().map(|c| c.trim().to_string()),
            usize::MAX,
        ),
    }
}

/// Fallback config installed when a platform branch errors or panics.
#[must_use]
pub fn generic_config(
    platform: Platform,
    keywords: &[String],
    geographic_focus: &str,
) -> PlatformConfig {
    let target = match platform.family() {
        Some(PlatformFamily::Discussion) => PlatformTarget::Discussion {
            communities: owned(GENERAL_COMMUNITIES).collect(),
        },
        Some(PlatformFamily::Marketplace) => PlatformTarget::Marketplace {
            products: Vec::new(),
            categories: owned(GENERAL_MARKETPLACE_CATEGORIES).collect(),
            product_url: None,
            product_id: None,
        },
        Some(PlatformFamily::Social) => PlatformTarget::Social {
            platforms: vec![platform.as_str().to_string()],
            hashtags: owned(GENERAL_HASHTAGS).collect(),
        },
        None => PlatformTarget::MarketAnalysis {
            sectors: Vec::new(),
            subsectors: Vec::new(),
            competitors: Vec::new(),
        },
    };

    PlatformConfig {
        enabled: true,
        target,
        keywords: keywords.to_vec(),
        filters: filter_policy(platform),
        geographic_focus: geographic_focus.to_string(),
    }
}

const fn expected_kind(platform: Platform) -> &'static str {
    match platform.family() {
        Some(PlatformFamily::Discussion) => "discussion",
        Some(PlatformFamily::Marketplace) => "marketplace",
        Some(PlatformFamily::Social) => "social",
        None => "market_analysis",
    }
}

const fn target_kind(target: &PlatformTarget) -> &'static str {
    match target {
        PlatformTarget::Discussion { .. } => "discussion",
        PlatformTarget::Marketplace { .. } => "marketplace",
        PlatformTarget::Social { .. } => "social",
        PlatformTarget::MarketAnalysis { .. } => "market_analysis",
    }
}
