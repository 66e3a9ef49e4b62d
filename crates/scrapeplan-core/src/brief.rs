//! Caller-supplied product/market brief and platform selection.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

/// A source platform a configuration can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Reddit,
    Amazon,
    Instagram,
    Tiktok,
    MarketAnalysis,
}

/// Target-resolution family a platform belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Discussion,
    Marketplace,
    Social,
}

impl Platform {
    /// Canonical ordering used when normalizing selections.
    pub const ALL: [Platform; 5] = [
        Platform::Reddit,
        Platform::Amazon,
        Platform::Instagram,
        Platform::Tiktok,
        Platform::MarketAnalysis,
    ];

    /// Selected when a brief does not choose any platform.
    pub const DEFAULT_SELECTION: [Platform; 4] = [
        Platform::Reddit,
        Platform::Amazon,
        Platform::Instagram,
        Platform::Tiktok,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Amazon => "amazon",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::MarketAnalysis => "market_analysis",
        }
    }

    /// `None` for market analysis, which skips target resolution.
    #[must_use]
    pub const fn family(self) -> Option<PlatformFamily> {
        match self {
            Platform::Reddit => Some(PlatformFamily::Discussion),
            Platform::Amazon => Some(PlatformFamily::Marketplace),
            Platform::Instagram | Platform::Tiktok => Some(PlatformFamily::Social),
            Platform::MarketAnalysis => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "reddit" => Ok(Platform::Reddit),
            "amazon" => Ok(Platform::Amazon),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            "market_analysis" => Ok(Platform::MarketAnalysis),
            _ => Err(CoreError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Platform choice as supplied by callers: either a list of names or a
/// name-to-flag mapping. Both forms normalize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformSelection {
    List(Vec<String>),
    Flags(BTreeMap<String, bool>),
}

impl PlatformSelection {
    /// Canonical, deduplicated platform list in [`Platform::ALL`] order.
    ///
    /// Unknown names are logged and dropped, so an explicit selection may
    /// resolve to no platform at all.
    #[must_use]
    pub fn normalize(&self) -> Vec<Platform> {
        let names: Vec<&str> = match self {
            PlatformSelection::List(names) => names.iter().map(String::as_str).collect(),
            PlatformSelection::Flags(flags) => flags
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(name, _)| name.as_str())
                .collect(),
        };

        let mut chosen = Vec::with_capacity(names.len());
        for name in names {
            match name.parse::<Platform>() {
                Ok(platform) => chosen.push(platform),
                Err(e) => tracing::warn!(error = %e, "ignoring unknown platform in selection"),
            }
        }

        Platform::ALL
            .into_iter()
            .filter(|p| chosen.contains(p))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAudience {
    /// `"male"`, `"female"`, or `"both"`.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl TargetAudience {
    #[must_use]
    pub fn is_specified(&self) -> bool {
        self.gender.as_deref().is_some_and(|g| !g.trim().is_empty())
            || self
                .age_range
                .as_deref()
                .is_some_and(|a| !a.trim().is_empty())
            || self.interests.iter().any(|i| !i.trim().is_empty())
    }

    /// Lowercased gender when it narrows the audience (not `"both"`).
    #[must_use]
    pub fn narrowing_gender(&self) -> Option<String> {
        self.gender
            .as_deref()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty() && g != "both")
    }
}

/// Minimal product/market description a configuration is synthesized from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectBrief {
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub geographic_focus: String,
    #[serde(default)]
    pub competitors: Vec<String>,
    /// `None` selects [`Platform::DEFAULT_SELECTION`].
    #[serde(default)]
    pub platform_selection: Option<PlatformSelection>,
    /// Caller keywords unioned with the synthesized set.
    #[serde(default)]
    pub seed_keywords: Vec<String>,
    /// Explicit marketplace product page to track.
    #[serde(default)]
    pub product_url: Option<String>,
    /// Explicit competitor product pages, appended verbatim to marketplace targets.
    #[serde(default)]
    pub competitor_urls: Vec<String>,
}

impl ProjectBrief {
    /// Platforms to configure, in [`Platform::ALL`] order.
    #[must_use]
    pub fn selected_platforms(&self) -> Vec<Platform> {
        self.platform_selection
            .as_ref()
            .map_or_else(|| Platform::DEFAULT_SELECTION.to_vec(), PlatformSelection::normalize)
    }
}

/// Load and validate a brief from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brief(path: &Path) -> Result<ProjectBrief, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BriefFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let brief: ProjectBrief = serde_yaml::from_str(&content)?;
    validate_brief(&brief)?;
    Ok(brief)
}

fn validate_brief(brief: &ProjectBrief) -> Result<(), ConfigError> {
    if brief.category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "brief category must be non-empty".to_string(),
        ));
    }

    let urls = brief.product_url.iter().chain(brief.competitor_urls.iter());
    for url in urls {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "'{url}' is not an http(s) URL"
            )));
        }
    }

    Ok(())
}
