//! Deterministic keyword generation backing the rule-based and minimal tiers.

use std::collections::HashSet;

use scrapeplan_core::{ProjectBrief, TargetAudience};

use crate::error::KeywordError;
use crate::stopwords::is_stopword;

/// Category-keyed templates applied to every category and subcategory.
/// `{}` is replaced by the lowercased label.
const GENERIC_TEMPLATES: &[&str] = &[
    "best {}",
    "{} review",
    "{} reviews",
    "top {}",
    "{} comparison",
    "{} alternatives",
    "cheap {}",
    "affordable {}",
    "{} for beginners",
    "{} recommendations",
];

/// Maximum audience interests turned into templates.
const MAX_INTEREST_TEMPLATES: usize = 3;

/// Description tokens this short or shorter never become keywords.
const MIN_TOKEN_CHARS: usize = 3;

/// Description tokens kept by the minimal tier.
const MINIMAL_DESCRIPTION_TOKENS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryKind {
    Technology,
    Beauty,
    Fitness,
    Food,
    Fashion,
    Home,
    Gaming,
    Pets,
}

impl CategoryKind {
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "technology" | "tech" | "electronics" | "software" | "gadgets" => {
                Some(CategoryKind::Technology)
            }
            "beauty" | "skincare" | "cosmetics" | "makeup" => Some(CategoryKind::Beauty),
            "fitness" | "sports" | "health" | "wellness" => Some(CategoryKind::Fitness),
            "food" | "beverage" | "beverages" | "food & beverage" | "snacks" => {
                Some(CategoryKind::Food)
            }
            "fashion" | "apparel" | "clothing" => Some(CategoryKind::Fashion),
            "home" | "home & garden" | "furniture" | "kitchen" => Some(CategoryKind::Home),
            "gaming" | "games" | "video games" => Some(CategoryKind::Gaming),
            "pets" | "pet" | "pet supplies" => Some(CategoryKind::Pets),
            _ => None,
        }
    }

    const fn templates(self) -> &'static [&'static str] {
        match self {
            CategoryKind::Technology => &[
                "{} specs",
                "{} setup",
                "{} troubleshooting",
                "{} deals",
                "{} accessories",
            ],
            CategoryKind::Beauty => &[
                "{} routine",
                "{} ingredients",
                "{} for sensitive skin",
                "{} before and after",
                "{} dupes",
            ],
            CategoryKind::Fitness => &[
                "{} workout",
                "{} at home",
                "{} results",
                "{} gear",
                "{} routine",
            ],
            CategoryKind::Food => &[
                "{} recipes",
                "{} taste test",
                "healthy {}",
                "where to buy {}",
                "{} flavors",
            ],
            CategoryKind::Fashion => &[
                "{} outfit ideas",
                "{} sizing",
                "{} haul",
                "{} style guide",
                "{} trends",
            ],
            CategoryKind::Home => &[
                "{} ideas",
                "{} setup",
                "{} organization",
                "diy {}",
                "{} must haves",
            ],
            CategoryKind::Gaming => &[
                "{} gameplay",
                "{} setup",
                "{} tips",
                "{} build",
                "{} settings",
            ],
            CategoryKind::Pets => &[
                "{} for dogs",
                "{} for cats",
                "vet recommended {}",
                "{} safety",
                "{} training",
            ],
        }
    }
}

/// Rule-based tier: n-grams from the description plus category, audience,
/// and template keywords, ordered by ascending length.
///
/// Ties in length keep generation order.
///
/// # Errors
///
/// Returns [`KeywordError::MissingInput`] when the description or category is
/// blank.
pub fn rule_based_keywords(brief: &ProjectBrief, count: usize) -> Result<Vec<String>, KeywordError> {
    let description = brief.description.trim();
    if description.is_empty() {
        return Err(KeywordError::MissingInput("description"));
    }
    let category = brief.category.trim().to_lowercase();
    if category.is_empty() {
        return Err(KeywordError::MissingInput("category"));
    }
    let subcategory = brief.subcategory.trim().to_lowercase();

    let tokens: Vec<String> = tokenize(description)
        .into_iter()
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS && !is_stopword(t))
        .collect();
    let mut candidates = tokens.clone();
    candidates.extend(ngrams(&tokens, 2));
    candidates.extend(ngrams(&tokens, 3));

    candidates.push(category.clone());
    if !subcategory.is_empty() {
        candidates.push(subcategory.clone());
        candidates.push(format!("{category} {subcategory}"));
    }

    if brief.target_audience.is_specified() {
        candidates.extend(audience_keywords(&category, &brief.target_audience));
    }

    candidates.extend(template_keywords(&category));
    if !subcategory.is_empty() {
        candidates.extend(template_keywords(&subcategory));
    }

    let mut keywords = dedup_preserving_order(candidates);
    keywords.sort_by_key(|k| k.chars().count());
    keywords.truncate(count);
    Ok(keywords)
}

/// Minimal tier: category, subcategory, and the first description tokens.
#[must_use]
pub fn minimal_keywords(brief: &ProjectBrief) -> Vec<String> {
    let head = [brief.category.trim(), brief.subcategory.trim()];
    let description = brief
        .description
        .split_whitespace()
        .take(MINIMAL_DESCRIPTION_TOKENS)
        .filter(|t| !is_stopword(t));

    dedup_preserving_order(head.into_iter().chain(description).map(str::to_string))
}

/// Exact-match deduplication keeping first occurrences; drops blank entries.
pub(crate) fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Lowercases and strips punctuation, then splits on whitespace.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Contiguous `n`-token windows over already filtered tokens. Windows that
/// still hold a stopword are skipped.
fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    tokens
        .windows(n)
        .filter(|window| !window.iter().any(|t| is_stopword(t)))
        .map(|window| window.join(" "))
        .collect()
}

fn audience_keywords(category: &str, audience: &TargetAudience) -> Vec<String> {
    let mut keywords = Vec::new();

    if let Some(gender) = audience.narrowing_gender() {
        let group = match gender.as_str() {
            "female" | "women" | "woman" => "women".to_string(),
            "male" | "men" | "man" => "men".to_string(),
            _ => gender,
        };
        keywords.push(format!("{category} for {group}"));
        keywords.push(format!("best {category} for {group}"));
    }

    if let Some(age) = audience
        .age_range
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    {
        keywords.push(format!("{category} for {age}"));
    }

    for interest in audience
        .interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .take(MAX_INTEREST_TEMPLATES)
    {
        keywords.push(format!("{category} for {interest}"));
    }

    keywords
}

fn template_keywords(label: &str) -> Vec<String> {
    let specific = CategoryKind::from_label(label)
        .map(CategoryKind::templates)
        .unwrap_or_default();

    GENERIC_TEMPLATES
        .iter()
        .chain(specific.iter())
        .map(|template| template.replace("{}", label))
        .collect()
}
