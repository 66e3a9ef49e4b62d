//! Prompt construction for the generative tiers and parsing of their output.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use scrapeplan_core::ProjectBrief;

use crate::stopwords::is_stopword;

/// System prompt shared by both generative tiers.
pub const SYSTEM_PROMPT: &str = "You are a market research assistant. You generate search \
keywords used to collect consumer discussions, product reviews and social media posts about a \
product. Respond with one keyword or short phrase per line and nothing else.";

/// Leading list markers: `1.`, `2)`, `3:`, `-`, `*`, `•`, `+`.
static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\s*[.):]\s*|[-*•+]\s*)").expect("valid list marker regex")
});

const QUOTE_CHARS: &[char] = &['"', '\'', '`', '“', '”', '‘', '’'];

/// Structured prompt for the primary tier.
#[must_use]
pub fn primary_prompt(
    brief: &ProjectBrief,
    count: usize,
    language: &str,
    include_competitors: bool,
) -> String {
    let mut prompt = format!(
        "Generate {count} search keywords in language '{language}' for market research on the \
         product below.\n\n"
    );

    let _ = writeln!(prompt, "Product description: {}", brief.description.trim());
    let _ = writeln!(prompt, "Category: {}", brief.category.trim());
    if !brief.subcategory.trim().is_empty() {
        let _ = writeln!(prompt, "Subcategory: {}", brief.subcategory.trim());
    }

    let audience = &brief.target_audience;
    if audience.is_specified() {
        let mut parts = Vec::new();
        if let Some(gender) = audience.gender.as_deref().filter(|g| !g.trim().is_empty()) {
            parts.push(format!("gender {}", gender.trim()));
        }
        if let Some(age) = audience.age_range.as_deref().filter(|a| !a.trim().is_empty()) {
            parts.push(format!("age {}", age.trim()));
        }
        if !audience.interests.is_empty() {
            parts.push(format!("interests {}", audience.interests.join(", ")));
        }
        let _ = writeln!(prompt, "Target audience: {}", parts.join("; "));
    }

    if !brief.geographic_focus.trim().is_empty() {
        let _ = writeln!(prompt, "Geographic focus: {}", brief.geographic_focus.trim());
    }

    if include_competitors && !brief.competitors.is_empty() {
        let _ = writeln!(prompt, "Competitors: {}", brief.competitors.join(", "));
    }

    prompt.push_str(
        "\nCover product terms, problems customers describe, comparison phrases and competitor \
         brand queries. Return one keyword per line without numbering or commentary.",
    );
    prompt
}

/// Short fallback prompt for the simplified tier.
#[must_use]
pub fn simplified_prompt(brief: &ProjectBrief, count: usize) -> String {
    let subject = if brief.subcategory.trim().is_empty() {
        brief.category.trim().to_string()
    } else {
        format!("{} / {}", brief.category.trim(), brief.subcategory.trim())
    };
    format!(
        "List {count} short search keywords for this {subject} product: {}\nOne keyword per line.",
        brief.description.trim()
    )
}

/// Splits a completion into keyword candidates.
///
/// Strips list numbering, bullets and surrounding quotes; drops blank lines,
/// header lines ending in `:`, and lines that are a single stopword.
#[must_use]
pub fn parse_candidates(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            LIST_MARKER_RE
                .replace(line, "")
                .trim()
                .trim_end_matches([',', ';', '.'])
                .trim_matches(QUOTE_CHARS)
                .trim_end_matches([',', ';', '.'])
                .trim()
                .to_string()
        })
        .filter(|candidate| !candidate.is_empty())
        .filter(|candidate| !candidate.ends_with(':'))
        .filter(|candidate| !is_stopword(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use scrapeplan_core::TargetAudience;

    use super::*;

    fn brief() -> ProjectBrief {
        ProjectBrief {
            description: "Collapsible silicone water bottle".to_string(),
            category: "fitness".to_string(),
            subcategory: "hydration".to_string(),
            geographic_focus: "US".to_string(),
            competitors: vec!["HydroFlask".to_string(), "Nalgene".to_string()],
            ..ProjectBrief::default()
        }
    }

    #[test]
    fn primary_prompt_carries_brief_fields() {
        let prompt = primary_prompt(&brief(), 25, "en", true);
        assert!(prompt.contains("Generate 25 search keywords in language 'en'"));
        assert!(prompt.contains("Subcategory: hydration"));
        assert!(prompt.contains("Geographic focus: US"));
        assert!(prompt.contains("Competitors: HydroFlask, Nalgene"));
        assert!(!prompt.contains("Target audience"));
    }

    #[test]
    fn primary_prompt_omits_competitors_when_disabled() {
        let prompt = primary_prompt(&brief(), 30, "de", false);
        assert!(!prompt.contains("HydroFlask"));
        assert!(prompt.contains("'de'"));
    }

    #[test]
    fn primary_prompt_describes_audience() {
        let mut b = brief();
        b.target_audience = TargetAudience {
            gender: Some("female".to_string()),
            age_range: None,
            interests: vec!["hiking".to_string(), "running".to_string()],
        };
        let prompt = primary_prompt(&b, 30, "en", true);
        assert!(prompt.contains("Target audience: gender female; interests hiking, running"));
    }

    #[test]
    fn simplified_prompt_is_short() {
        let prompt = simplified_prompt(&brief(), 30);
        assert!(prompt.contains("fitness / hydration"));
        assert!(!prompt.contains("HydroFlask"));
        assert!(prompt.len() < primary_prompt(&brief(), 30, "en", true).len());
    }

    #[test]
    fn parse_strips_markers_and_quotes() {
        let text = "Here are your keywords:\n1. \"collapsible bottle\"\n2) silicone bottle\n\
                    - hiking water bottle\n* 'leak proof bottle',\n\n• travel bottle\nthe\n";
        assert_eq!(
            parse_candidates(text),
            vec![
                "collapsible bottle",
                "silicone bottle",
                "hiking water bottle",
                "leak proof bottle",
                "travel bottle",
            ]
        );
    }

    #[test]
    fn parse_of_blank_text_is_empty() {
        assert!(parse_candidates("\n  \n1.\n-\n").is_empty());
    }
}
