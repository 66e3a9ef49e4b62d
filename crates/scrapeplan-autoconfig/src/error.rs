use scrapeplan_core::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoConfigError {
    /// The resolved target does not belong to the platform's family.
    #[error("{platform} cannot use a {found} target")]
    TargetMismatch {
        platform: Platform,
        found: &'static str,
    },

    /// The persister rejected the finished configuration.
    #[error("failed to persist scraping config: {0}")]
    Persist(#[source] Box<dyn std::error::Error + Send + Sync>),
}
