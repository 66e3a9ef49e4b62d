//! Four-tier keyword cascade.
//!
//! Each tier yields a [`TierOutcome`]; a failed outcome advances the cascade
//! via [`Tier::next`]. The minimal tier always produces, so
//! [`KeywordSynthesizer::generate`] is infallible and reports degradation
//! through [`KeywordSet::confidence`] instead.

use std::time::Duration;

use scrapeplan_core::{AppConfig, KeywordSet, KeywordSource, ProjectBrief};

use crate::client::{GenerationRequest, KeywordGenerator};
use crate::error::KeywordError;
use crate::prompt::{parse_candidates, primary_prompt, simplified_prompt, SYSTEM_PROMPT};
use crate::retry::retry_with_backoff;
use crate::rules::{dedup_preserving_order, minimal_keywords, rule_based_keywords};

/// Per-request knobs for [`KeywordSynthesizer::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Language hint passed to the primary prompt.
    pub language: String,
    /// Upper bound on returned terms.
    pub count: usize,
    /// Whether competitor names are included in the primary prompt.
    pub include_competitors: bool,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            count: 30,
            include_competitors: true,
        }
    }
}

/// Call policy for the generative tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Outer bound on a single generative call, on top of the HTTP timeout.
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            max_retries: 1,
            backoff_base_ms: 500,
        }
    }
}

impl GenerationSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            model: config.llm_model.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
            timeout: Duration::from_secs(config.llm_timeout_secs),
            max_retries: config.llm_max_retries,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Primary,
    Simplified,
    RuleBased,
    Minimal,
}

impl Tier {
    const fn source(self) -> KeywordSource {
        match self {
            Tier::Primary => KeywordSource::PrimaryGenerative,
            Tier::Simplified => KeywordSource::SimplifiedGenerative,
            Tier::RuleBased => KeywordSource::RuleBased,
            Tier::Minimal => KeywordSource::Minimal,
        }
    }

    const fn next(self) -> Option<Tier> {
        match self {
            Tier::Primary => Some(Tier::Simplified),
            Tier::Simplified => Some(Tier::RuleBased),
            Tier::RuleBased => Some(Tier::Minimal),
            Tier::Minimal => None,
        }
    }
}

#[derive(Debug)]
enum TierOutcome {
    Produced(Vec<String>),
    Failed(KeywordError),
}

/// Produces a [`KeywordSet`] from a brief, degrading through the cascade.
///
/// Without a generator the cascade starts at the rule-based tier. Nothing is
/// cached between calls.
pub struct KeywordSynthesizer<G> {
    generator: Option<G>,
    settings: GenerationSettings,
}

impl<G: KeywordGenerator> KeywordSynthesizer<G> {
    #[must_use]
    pub fn new(generator: Option<G>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Synthesizer that never calls a generative backend.
    #[must_use]
    pub fn rule_based_only() -> Self {
        Self::new(None, GenerationSettings::default())
    }

    #[must_use]
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Runs the cascade and returns the first tier's output that succeeds.
    pub async fn generate(&self, brief: &ProjectBrief, options: &KeywordOptions) -> KeywordSet {
        let mut tier = if self.generator.is_some() {
            Tier::Primary
        } else {
            tracing::debug!("no generative client configured, starting at rule-based tier");
            Tier::RuleBased
        };

        loop {
            match self.run_tier(tier, brief, options).await {
                TierOutcome::Produced(terms) => {
                    tracing::debug!(tier = ?tier, count = terms.len(), "keyword tier produced");
                    return KeywordSet::new(terms, tier.source());
                }
                TierOutcome::Failed(err) => match tier.next() {
                    Some(next) => {
                        tracing::warn!(
                            tier = ?tier,
                            next = ?next,
                            error = %err,
                            "keyword tier failed, falling back"
                        );
                        tier = next;
                    }
                    None => {
                        tracing::error!(error = %err, "minimal keyword tier failed");
                        return KeywordSet::new(Vec::new(), KeywordSource::Minimal);
                    }
                },
            }
        }
    }

    async fn run_tier(
        &self,
        tier: Tier,
        brief: &ProjectBrief,
        options: &KeywordOptions,
    ) -> TierOutcome {
        let count = options.count.max(1);
        let result = match tier {
            Tier::Primary | Tier::Simplified => match &self.generator {
                Some(generator) => self.generative_tier(generator, tier, brief, options).await,
                None => Err(KeywordError::InvalidConfig(
                    "no generative client configured".to_string(),
                )),
            },
            Tier::RuleBased => rule_based_keywords(brief, count),
            Tier::Minimal => {
                let mut terms = minimal_keywords(brief);
                terms.truncate(count);
                Ok(terms)
            }
        };

        match result {
            Ok(terms) => TierOutcome::Produced(terms),
            Err(err) => TierOutcome::Failed(err),
        }
    }

    async fn generative_tier(
        &self,
        generator: &G,
        tier: Tier,
        brief: &ProjectBrief,
        options: &KeywordOptions,
    ) -> Result<Vec<String>, KeywordError> {
        if brief.description.trim().is_empty() {
            return Err(KeywordError::MissingInput("description"));
        }
        if brief.category.trim().is_empty() {
            return Err(KeywordError::MissingInput("category"));
        }

        let count = options.count.max(1);
        let user_prompt = if tier == Tier::Primary {
            primary_prompt(brief, count, &options.language, options.include_competitors)
        } else {
            simplified_prompt(brief, count)
        };
        let request = GenerationRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt,
            model_id: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let request = &request;
        let timeout = self.settings.timeout;
        let response = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            move || async move {
                match tokio::time::timeout(timeout, generator.generate(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(KeywordError::Timeout(timeout)),
                }
            },
        )
        .await?;

        let candidates = parse_candidates(&response.text);
        if candidates.is_empty() {
            return Err(KeywordError::EmptyResponse);
        }

        let supplement = rule_based_keywords(brief, count).unwrap_or_default();
        let mut merged = dedup_preserving_order(candidates.into_iter().chain(supplement));
        merged.truncate(count);
        Ok(merged)
    }
}

#[cfg(test)]
#[path = "synthesizer_test.rs"]
mod tests;
