use crate::domain::entities::keyword::ProcessedKeyword;

pub const MAX_LABEL_CHARS: usize = 50;

/// Trailing words that describe how something is bought, not what it is.
const COMMERCIAL_SUFFIXES: &[&str] = &[
    "near me",
    "for sale",
    "manufacturers",
    "manufacturer",
    "suppliers",
    "supplier",
    "wholesale",
    "prices",
    "price",
    "cost",
    "online",
    "buy",
];

/// Label a group after its highest-volume member (earliest wins ties).
pub fn cluster_label<'a, I>(members: I) -> String
where
    I: IntoIterator<Item = &'a ProcessedKeyword>,
{
    let mut best: Option<&ProcessedKeyword> = None;
    for kw in members {
        match best {
            Some(b) if kw.volume <= b.volume => {}
            _ => best = Some(kw),
        }
    }
    best.map(|kw| label_from_text(&kw.normalized_text))
        .unwrap_or_default()
}

/// Strip trailing commercial suffixes, title-case, cap the length.
pub fn label_from_text(normalized: &str) -> String {
    let stripped = strip_commercial_suffixes(normalized.trim());
    let base = if stripped.is_empty() {
        normalized.trim()
    } else {
        stripped
    };
    let titled = base
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    titled.chars().take(MAX_LABEL_CHARS).collect()
}

fn strip_commercial_suffixes(mut text: &str) -> &str {
    'outer: loop {
        for suffix in COMMERCIAL_SUFFIXES {
            if text == *suffix {
                return "";
            }
            if let Some(rest) = text.strip_suffix(suffix) {
                if rest.ends_with(' ') {
                    text = rest.trim_end();
                    continue 'outer;
                }
            }
        }
        return text;
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
