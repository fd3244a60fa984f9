//! TF-IDF over unigrams and adjacent-word bigrams.
//!
//! - TF is max-normalized: `count / max_count` within a document.
//! - IDF is smoothed: `ln((N + 1) / (df + 1)) + 1`, with `N` and `df`
//!   counted over the texts of one call only.

use std::collections::HashMap;

use crate::domain::ports::vectorizer::Vectorizer;
use crate::domain::values::term_vector::TermVector;

/// Tokens at or below this length are dropped.
const MIN_TOKEN_CHARS: usize = 1;

pub struct TfIdfVectorizer;

impl TfIdfVectorizer {
    /// Unigrams longer than one character followed by underscore-joined
    /// bigrams of each adjacent unigram pair.
    pub fn tokenize(text: &str) -> Vec<String> {
        let unigrams: Vec<&str> = text
            .split_whitespace()
            .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
            .collect();
        let bigrams = unigrams.windows(2).map(|w| format!("{}_{}", w[0], w[1]));
        unigrams
            .iter()
            .map(|t| t.to_string())
            .chain(bigrams)
            .collect()
    }

    fn term_counts(tokens: &[String]) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_default() += 1;
        }
        counts
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn vectorize(&self, texts: &[String]) -> Vec<TermVector> {
        let docs: Vec<Vec<String>> = texts.iter().map(|t| Self::tokenize(t)).collect();
        let counts: Vec<HashMap<&str, usize>> = docs.iter().map(|d| Self::term_counts(d)).collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *df.entry(*term).or_default() += 1;
            }
        }

        let n = texts.len() as f64;
        let idf = |term: &str| -> f64 {
            let d = df.get(term).copied().unwrap_or(0) as f64;
            ((n + 1.0) / (d + 1.0)).ln() + 1.0
        };

        counts
            .iter()
            .map(|doc| {
                let max = doc.values().copied().max().unwrap_or(0);
                if max == 0 {
                    return TermVector::new();
                }
                doc.iter()
                    .map(|(term, count)| {
                        let tf = *count as f64 / max as f64;
                        (term.to_string(), tf * idf(*term))
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_unigrams_and_bigrams() {
        let tokens = TfIdfVectorizer::tokenize("red cotton yarn");
        assert_eq!(
            tokens,
            vec!["red", "cotton", "yarn", "red_cotton", "cotton_yarn"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_chars_before_pairing() {
        let tokens = TfIdfVectorizer::tokenize("a cotton x yarn");
        assert_eq!(tokens, vec!["cotton", "yarn", "cotton_yarn"]);
    }

    #[test]
    fn test_idf_formula() {
        let vectors = TfIdfVectorizer.vectorize(&texts(&["cotton yarn", "cotton thread"]));
        // cotton: df = 2, N = 2 → ln(3/3) + 1 = 1
        assert!((vectors[0].get("cotton").unwrap() - 1.0).abs() < 1e-12);
        // yarn: df = 1 → ln(3/2) + 1
        let expected = (3.0_f64 / 2.0).ln() + 1.0;
        assert!((vectors[0].get("yarn").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tf_is_max_normalized() {
        let vectors = TfIdfVectorizer.vectorize(&texts(&["yarn yarn cotton"]));
        // N = 1, df = 1 for all terms → idf = ln(1) + 1 = 1
        assert!((vectors[0].get("yarn").unwrap() - 1.0).abs() < 1e-12);
        assert!((vectors[0].get("cotton").unwrap() - 0.5).abs() < 1e-12);
        assert!((vectors[0].get("yarn_yarn").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_yields_empty_vector() {
        let vectors = TfIdfVectorizer.vectorize(&texts(&["", "cotton yarn"]));
        assert_eq!(vectors.len(), 2);
        assert!(vectors[0].is_empty());
        assert!(!vectors[1].is_empty());
    }

    #[test]
    fn test_idf_is_relative_to_call() {
        let alone = TfIdfVectorizer.vectorize(&texts(&["cotton"]));
        let pooled = TfIdfVectorizer.vectorize(&texts(&["cotton", "wool", "silk"]));
        assert!(pooled[0].get("cotton").unwrap() > alone[0].get("cotton").unwrap());
    }
}
