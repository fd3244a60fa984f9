use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether clustering runs over the whole keyword set or once per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterPolicy {
    #[default]
    Topic,
    BucketSeparated,
}

impl fmt::Display for ClusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic => write!(f, "topic"),
            Self::BucketSeparated => write!(f, "bucket-separated"),
        }
    }
}

impl FromStr for ClusterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "topic" => Ok(Self::Topic),
            "bucket-separated" | "bucket_separated" | "bucket" => Ok(Self::BucketSeparated),
            _ => Err(format!(
                "Invalid cluster policy: '{}'. Use 'topic' or 'bucket-separated'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policies() {
        assert_eq!("topic".parse::<ClusterPolicy>().unwrap(), ClusterPolicy::Topic);
        assert_eq!(
            "Bucket-Separated".parse::<ClusterPolicy>().unwrap(),
            ClusterPolicy::BucketSeparated
        );
        assert!("semantic".parse::<ClusterPolicy>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ClusterPolicy::BucketSeparated).unwrap();
        assert_eq!(json, "\"bucket-separated\"");
    }
}
