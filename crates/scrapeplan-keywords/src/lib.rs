//! Keyword synthesis for scrapeplan.
//!
//! Produces a ranked [`KeywordSet`](scrapeplan_core::KeywordSet) from a project
//! brief through a four-tier cascade: a structured generative call, a
//! simplified generative call, deterministic rule-based n-grams and templates,
//! and a minimal category/description fallback. Generation never fails; each
//! degradation lowers the reported confidence instead.

pub mod client;
pub mod error;
pub mod prompt;
pub mod rules;
pub mod stopwords;
pub mod synthesizer;

mod retry;

pub use client::{ChatCompletionsClient, GenerationRequest, GenerationResponse, KeywordGenerator};
pub use error::KeywordError;
pub use rules::{minimal_keywords, rule_based_keywords};
pub use stopwords::is_stopword;
pub use synthesizer::{GenerationSettings, KeywordOptions, KeywordSynthesizer};
