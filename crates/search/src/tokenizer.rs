//! Text normalization for search
//!
//! Pipeline (normalized form, used by TF-IDF and composite scoring):
//! lowercase → expand contractions → whitespace split → strip punctuation
//! → remove stopwords → Snowball stem → join with single spaces
//!
//! BM25 does not use this pipeline. It scores [`raw_tokens`] of both the
//! query and the corpus content, so the two algorithms can disagree on
//! queries that carry inflected forms or stopwords.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm as StemAlgorithm, Stemmer};
use std::collections::HashSet;

/// English stopwords (the NLTK `english` list).
///
/// Entries containing apostrophes never match after punctuation stripping;
/// they are kept so the set stays identical to the reference list.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(StemAlgorithm::English));

/// Contraction rules, applied in order to the lowercased text.
static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\b(\w+)'s\b", "${1}"),
        (r"\b(\w+)n't\b", "${1} not"),
        (r"\b(\w+)'ll\b", "${1} will"),
        (r"\b(\w+)'d\b", "${1} would"),
        (r"\b(\w+)'re\b", "${1} are"),
        (r"\b(\w+)'ve\b", "${1} have"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("contraction pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Two-or-more word characters; the TF-IDF term pattern.
static TERM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Check if a token is a stopword.
#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Expand English contractions in already-lowercased text.
fn expand_contractions(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Normalize text into its stemmed, stopword-free terms.
///
/// # Example
///
/// ```
/// use tweetrank_search::tokenizer::normalize_terms;
///
/// let terms = normalize_terms("Cats are great pets");
/// assert_eq!(terms, vec!["cat", "great", "pet"]);
/// ```
pub fn normalize_terms(text: &str) -> Vec<String> {
    let expanded = expand_contractions(&text.to_lowercase());
    expanded
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .filter(|token| !is_stopword(token))
        .map(|token| STEMMER.stem(&token).into_owned())
        .collect()
}

/// Normalize text into a single space-separated string of terms.
///
/// # Example
///
/// ```
/// use tweetrank_search::tokenizer::normalize;
///
/// assert_eq!(normalize("I don't like running!"), "like run");
/// ```
pub fn normalize(text: &str) -> String {
    normalize_terms(text).join(" ")
}

/// Split text on whitespace with no other processing.
///
/// This is the token form BM25 scores, for both queries and documents.
pub fn raw_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Extract terms of two or more word characters, with no other processing.
pub fn term_pattern_tokens(text: &str) -> Vec<String> {
    TERM_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// TF-IDF analyzer: normalize, then keep terms of two or more word characters.
pub fn analyze(text: &str) -> Vec<String> {
    term_pattern_tokens(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Cats are great pets"), "cat great pet");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Hello,   WORLD  "), "hello world");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert!(normalize_terms("").is_empty());
    }

    #[test]
    fn test_normalize_only_punctuation() {
        assert_eq!(normalize("...!!! ---"), "");
    }

    #[test]
    fn test_all_stopwords() {
        assert!(normalize_terms("the the the").is_empty());
        assert!(normalize_terms("The AND Not").is_empty());
    }

    #[test]
    fn test_contraction_not() {
        // "don't" → "do not"; all three of i/do/not are stopwords
        assert_eq!(normalize("I don't like it"), "like");
    }

    #[test]
    fn test_contraction_will_and_have() {
        assert_eq!(normalize("We'll see what they've done!"), "see done");
    }

    #[test]
    fn test_possessive() {
        assert_eq!(normalize("John's running shoes"), "john run shoe");
    }

    #[test]
    fn test_expand_contractions_order() {
        assert_eq!(expand_contractions("we're here"), "we are here");
        assert_eq!(expand_contractions("she'd go"), "she would go");
        assert_eq!(expand_contractions("isn't"), "is not");
    }

    #[test]
    fn test_punctuation_stripped_inside_token() {
        assert_eq!(normalize("#hello-world"), "helloworld");
    }

    #[test]
    fn test_stemming_plurals() {
        assert_eq!(normalize_terms("dogs cats"), vec!["dog", "cat"]);
    }

    #[test]
    fn test_raw_tokens_untouched() {
        assert_eq!(raw_tokens("The  cats!"), vec!["The", "cats!"]);
        assert!(raw_tokens("   ").is_empty());
    }

    #[test]
    fn test_analyze_drops_single_chars() {
        assert_eq!(analyze("Cats and dogs"), vec!["cat", "dog"]);
        assert!(analyze("b c").is_empty());
    }

    #[test]
    fn test_term_pattern_tokens() {
        assert_eq!(term_pattern_tokens("cat x dog-house"), vec!["cat", "dog", "house"]);
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("the"));
        assert!(is_stopword("shouldn"));
        assert!(!is_stopword("cat"));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let text = "Farmers aren't backing down; we're protesting again!";
        assert_eq!(normalize(text), normalize(text));
    }
}
