//! Multi-platform scraping configuration synthesis.
//!
//! [`ConfigOrchestrator`] turns a [`ProjectBrief`](scrapeplan_core::ProjectBrief)
//! into a [`ScrapingConfig`](scrapeplan_core::ScrapingConfig): one keyword
//! cascade run, then a concurrent resolve-and-build branch per selected
//! platform. Each branch is isolated, so a failing or panicking platform
//! degrades to a generic config without affecting the others.

pub mod builder;
pub mod error;
pub mod filters;
pub mod orchestrator;
pub mod targets;

pub use builder::{build, generic_config, market_analysis_target};
pub use error::AutoConfigError;
pub use filters::filter_policy;
pub use orchestrator::ConfigOrchestrator;
pub use targets::extract_product_id;
