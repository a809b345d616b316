//! Text normalization applied before similarity scoring.
//!
//! Both sides of every comparison pass through [`normalize`] so the models
//! always see candidate and reference in the same shape: lowercased,
//! tokenized, stop words removed, remaining tokens lemmatized, rejoined with
//! single spaces.
//!
//! Negation detection via [`contains_negation`] runs on the *original*
//! strings, not the normalized ones - "not" is a stop word and would be gone
//! by the time normalization finishes.

mod lemma;
mod stopwords;


pub use lemma::lemmatize;
pub use stopwords::is_stop_word;

/// Tokens signalling logical negation. Closed set; `n't` additionally matches
/// contraction suffixes ("isn't", "don't") the way a word tokenizer would
/// split them.
pub const NEGATION_MARKERS: [&str; 6] = ["not", "never", "no", "none", "cannot", "n't"];

/// Splits `text` into lowercase word tokens.
///
/// Apostrophes are kept inside tokens so contractions survive tokenization
/// and negation suffixes stay detectable.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalizes `text` for model input: lowercase, stop-word removal,
/// lemmatization, single-space rejoin.
pub fn normalize(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .map(|t| lemmatize(&t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if `text` contains any negation marker.
pub fn contains_negation(text: &str) -> bool {
    tokenize(text).iter().any(|token| {
        NEGATION_MARKERS.contains(&token.as_str()) || token.ends_with("n't")
    })
}
