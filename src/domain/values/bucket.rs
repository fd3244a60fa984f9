use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Tag for buckets whose name has no letters at all.
const FALLBACK_TAG: &str = "BUCKET";

/// Search-intent bucket a keyword was filed under.
///
/// Known buckets get their own variant; anything else is carried verbatim
/// (trimmed, lowercased) in [`Bucket::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Buy,
    Learn,
    Compare,
    Local,
    Brand,
    Include,
    Exclude,
    #[default]
    Unassigned,
    Other(String),
}

impl Bucket {
    /// Uppercased, letters-only tag used to namespace cluster ids.
    pub fn tag(&self) -> String {
        let tag: String = self
            .to_string()
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
            .collect();
        if tag.is_empty() {
            FALLBACK_TAG.to_string()
        } else {
            tag
        }
    }

    /// True for the commercial ("buy") intent bucket.
    pub fn is_commercial(&self) -> bool {
        matches!(self, Bucket::Buy)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Buy => write!(f, "buy"),
            Bucket::Learn => write!(f, "learn"),
            Bucket::Compare => write!(f, "compare"),
            Bucket::Local => write!(f, "local"),
            Bucket::Brand => write!(f, "brand"),
            Bucket::Include => write!(f, "include"),
            Bucket::Exclude => write!(f, "exclude"),
            Bucket::Unassigned => write!(f, "unassigned"),
            Bucket::Other(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for Bucket {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Ok(match name.as_str() {
            "buy" => Bucket::Buy,
            "learn" => Bucket::Learn,
            "compare" => Bucket::Compare,
            "local" => Bucket::Local,
            "brand" => Bucket::Brand,
            "include" => Bucket::Include,
            "exclude" => Bucket::Exclude,
            "" | "none" | "unassigned" => Bucket::Unassigned,
            _ => Bucket::Other(name),
        })
    }
}

impl Serialize for Bucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bucket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(Bucket::Unassigned),
            Some(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Bucket {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse("BUY"), Bucket::Buy);
        assert_eq!(parse(" Include "), Bucket::Include);
    }

    #[test]
    fn test_empty_parses_as_unassigned() {
        assert_eq!(parse(""), Bucket::Unassigned);
        assert_eq!(parse("none"), Bucket::Unassigned);
    }

    #[test]
    fn test_unknown_bucket_is_kept() {
        assert_eq!(parse(" Informational "), Bucket::Other("informational".into()));
        assert!(!parse("purchase").is_commercial());
    }

    #[test]
    fn test_tag_is_uppercase_letters() {
        assert_eq!(Bucket::Include.tag(), "INCLUDE");
        assert_eq!(Bucket::Exclude.tag(), "EXCLUDE");
        assert_eq!(parse("how-to 2").tag(), "HOWTO");
        assert_eq!(parse("404").tag(), "BUCKET");
    }

    #[test]
    fn test_display_roundtrips() {
        let buckets = [
            Bucket::Buy,
            Bucket::Learn,
            Bucket::Compare,
            Bucket::Local,
            Bucket::Brand,
            Bucket::Include,
            Bucket::Exclude,
            Bucket::Unassigned,
            Bucket::Other("informational".into()),
        ];
        for bucket in buckets {
            assert_eq!(parse(&bucket.to_string()), bucket);
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let b: Bucket = serde_json::from_str("null").unwrap();
        assert_eq!(b, Bucket::Unassigned);
        let b: Bucket = serde_json::from_str("\"Buy\"").unwrap();
        assert_eq!(b, Bucket::Buy);
        let b: Bucket = serde_json::from_str("\"Navigational\"").unwrap();
        assert_eq!(b, Bucket::Other("navigational".into()));
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"navigational\"");
        assert_eq!(serde_json::to_string(&Bucket::Buy).unwrap(), "\"buy\"");
    }
}
