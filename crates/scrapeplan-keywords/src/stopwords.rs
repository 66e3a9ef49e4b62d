//! Function-word dictionary applied at every tier that touches free text.

/// Lowercase English function words. Matching is case-insensitive.
pub(crate) const STOPWORDS: &[&str] = &[
    // Articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "each", "every",
    "another", "such", "what", "which", "whose",
    // Pronouns
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours",
    "you", "your", "yours", "yourself", "he", "him", "his", "himself",
    "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "who", "whom",
    // Auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must",
    // Prepositions
    "about", "above", "across", "after", "against", "along", "among", "around",
    "at", "before", "behind", "below", "between",
    "by", "down", "during", "for", "from", "in", "into", "near", "of",
    "off", "on", "out", "over", "through", "to",
    "under", "until", "up", "with",
    // Conjunctions
    "and", "or", "but", "nor", "so", "yet", "because",
    "while", "unless", "since", "if", "than", "whether",
    // Adverbs and fillers
    "also", "just", "very", "too", "only", "then", "there", "here", "when", "where",
    "why", "how", "now", "again", "ever", "never", "always", "often", "still",
    "really", "not", "no", "yes", "all", "any",
    "both", "few", "more", "most", "other", "some", "much", "many", "own", "same",
    "once",
];

/// Returns `true` if `word` (or phrase) is exactly a stopword, ignoring case
/// and surrounding whitespace.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    let normalized = word.trim().to_lowercase();
    STOPWORDS.contains(&normalized.as_str())
}
