//! Keyword text cleanup.
//!
//! Two stages: [`normalize`] produces the display-safe lowercase form, and
//! [`extract_topic`] strips geography, commercial modifiers and stopwords so
//! only the words that say what a keyword is *about* remain for similarity.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid non-word pattern"));

const GEO_PHRASES: &[&str] = &[
    "near me",
    "near by",
    "in my area",
    "united states",
    "united kingdom",
    "new york",
    "new jersey",
    "new mexico",
    "new orleans",
    "los angeles",
    "las vegas",
    "san francisco",
    "san diego",
    "san antonio",
    "san jose",
    "salt lake city",
    "kansas city",
    "st louis",
    "hong kong",
    "north carolina",
    "south carolina",
    "north dakota",
    "south dakota",
    "west virginia",
    "rhode island",
];

static GEO_PHRASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = GEO_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid geo phrase pattern")
});

static GEO_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "usa", "us", "uk", "america", "american", "canada", "india", "china", "australia",
        "europe", "germany", "texas", "california", "florida", "ohio", "georgia", "arizona",
        "colorado", "washington", "virginia", "michigan", "illinois", "pennsylvania",
        "chicago", "houston", "dallas", "austin", "seattle", "boston", "atlanta", "miami",
        "denver", "phoenix", "portland", "philadelphia", "detroit", "nyc", "la", "nearby",
        "locally",
    ]
    .into_iter()
    .collect()
});

static COMMERCIAL_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "manufacturer", "manufacturers", "manufacturing", "supplier", "suppliers", "supply",
        "wholesale", "wholesaler", "wholesalers", "distributor", "distributors", "exporter",
        "exporters", "factory", "factories", "vendor", "vendors", "dealer", "dealers",
        "company", "companies", "price", "prices", "pricing", "cost", "costs", "cheap",
        "cheapest", "bulk", "buy", "sale", "sales", "online", "shop", "store", "best", "top",
    ]
    .into_iter()
    .collect()
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "an", "and", "or", "for", "of", "in", "on", "at", "to", "with", "by", "from",
        "is", "are", "was", "be", "it", "its", "as", "that", "this", "these", "those", "how",
        "what", "where", "which", "who", "why", "when", "can", "do", "does", "near", "me",
        "my", "your", "you", "vs", "versus", "about", "into", "than", "there",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, replace non-word characters with spaces, collapse, trim.
pub fn normalize(keyword: &str) -> String {
    NON_WORD
        .replace_all(&keyword.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Strip geo phrases and words, commercial modifiers, stopwords and
/// one-character tokens from normalized text.
pub fn extract_topic(normalized: &str) -> String {
    let without_phrases = GEO_PHRASE_PATTERN.replace_all(normalized, " ");
    without_phrases
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !GEO_WORDS.contains(t))
        .filter(|t| !COMMERCIAL_WORDS.contains(t))
        .filter(|t| !STOPWORDS.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("  Red-Cotton   YARN!! "), "red cotton yarn");
        assert_eq!(normalize("yarn, 100% cotton"), "yarn 100 cotton");
    }

    #[test]
    fn test_normalize_keeps_underscore_and_accents() {
        assert_eq!(normalize("Baumwoll_Garn"), "baumwoll_garn");
        assert_eq!(normalize("Café Crème"), "café crème");
    }

    #[test]
    fn test_topic_removes_geo_phrase() {
        assert_eq!(extract_topic("cotton yarn near me"), "cotton yarn");
        assert_eq!(extract_topic("cotton yarn new york"), "cotton yarn");
    }

    #[test]
    fn test_topic_removes_modifiers_and_stopwords() {
        assert_eq!(
            extract_topic("best cotton yarn manufacturers in texas"),
            "cotton yarn"
        );
        assert_eq!(extract_topic("price of wholesale silk thread"), "silk thread");
    }

    #[test]
    fn test_topic_drops_short_tokens() {
        assert_eq!(extract_topic("a cotton x yarn"), "cotton yarn");
    }

    #[test]
    fn test_topic_can_be_empty() {
        assert_eq!(extract_topic("buy near me"), "");
        assert_eq!(extract_topic(&normalize("Wholesale Suppliers USA")), "");
    }

    #[test]
    fn test_geo_phrase_needs_word_boundary() {
        // "renew york" must not lose "new york"
        assert_eq!(extract_topic("renew yorkshire wool"), "renew yorkshire wool");
    }

    #[test]
    fn test_colors_and_materials_survive() {
        assert_eq!(extract_topic("red cotton yarn"), "red cotton yarn");
        assert_eq!(extract_topic("blue cotton yarn"), "blue cotton yarn");
        assert_eq!(extract_topic("red cotton thread"), "red cotton thread");
    }
}
