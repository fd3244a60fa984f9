use serde::{Deserialize, Serialize};

use crate::domain::values::bucket::Bucket;
use crate::domain::values::unclustered_reason::UnclusteredReason;

/// One raw keyword as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    #[serde(default)]
    pub volume: u64,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub bucket: Bucket,
    #[serde(default)]
    pub locale: String,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, volume: u64, position: Option<u32>, bucket: Bucket) -> Self {
        Self {
            keyword: keyword.into(),
            volume,
            position,
            bucket,
            locale: String::new(),
        }
    }
}

/// External pin of a keyword to a cluster id. A missing cluster id removes
/// the keyword from clustering altogether.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignment {
    pub keyword: String,
    #[serde(default)]
    pub cluster_id: Option<String>,
}

impl ManualAssignment {
    pub fn pin(keyword: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            cluster_id: Some(cluster_id.into()),
        }
    }

    pub fn remove(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            cluster_id: None,
        }
    }

    /// Key used to match assignments against keyword records.
    pub fn match_key(keyword: &str) -> String {
        keyword.trim().to_lowercase()
    }
}

/// Per-run working copy of a keyword, filled in as the pipeline proceeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedKeyword {
    pub raw: String,
    pub normalized_text: String,
    pub topic_text: String,
    pub volume: u64,
    pub position: Option<u32>,
    pub bucket: Bucket,
    pub locale: String,
    pub cluster_id: Option<String>,
    pub cluster_label: Option<String>,
    pub unclustered_reason: Option<UnclusteredReason>,
    pub is_manual: bool,
}

impl ProcessedKeyword {
    pub fn new(record: &KeywordRecord, normalized_text: String, topic_text: String) -> Self {
        Self {
            raw: record.keyword.clone(),
            normalized_text,
            topic_text,
            volume: record.volume,
            position: record.position,
            bucket: record.bucket.clone(),
            locale: record.locale.clone(),
            cluster_id: None,
            cluster_label: None,
            unclustered_reason: None,
            is_manual: false,
        }
    }

    pub fn assign(&mut self, cluster_id: &str, label: &str) {
        self.cluster_id = Some(cluster_id.to_string());
        self.cluster_label = Some(label.to_string());
        self.unclustered_reason = None;
    }

    pub fn mark_unclustered(&mut self, reason: UnclusteredReason) {
        self.cluster_id = None;
        self.cluster_label = None;
        self.unclustered_reason = Some(reason);
    }

    pub fn is_clustered(&self) -> bool {
        self.cluster_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let rec: KeywordRecord = serde_json::from_str(r#"{"keyword": "cotton yarn"}"#).unwrap();
        assert_eq!(rec.volume, 0);
        assert_eq!(rec.position, None);
        assert_eq!(rec.bucket, Bucket::Unassigned);
        assert_eq!(rec.locale, "");
    }

    #[test]
    fn test_assign_clears_reason() {
        let rec = KeywordRecord::new("cotton yarn", 10, None, Bucket::Buy);
        let mut kw = ProcessedKeyword::new(&rec, "cotton yarn".into(), "cotton yarn".into());
        kw.mark_unclustered(UnclusteredReason::InsufficientSimilarity);
        assert!(!kw.is_clustered());
        kw.assign("cluster_1", "Cotton Yarn");
        assert!(kw.is_clustered());
        assert_eq!(kw.unclustered_reason, None);
    }

    #[test]
    fn test_manual_assignment_wire_format() {
        let pin: ManualAssignment =
            serde_json::from_str(r#"{"keyword": "Red Yarn", "clusterId": "cluster_X"}"#).unwrap();
        assert_eq!(pin.cluster_id.as_deref(), Some("cluster_X"));
        let removal: ManualAssignment = serde_json::from_str(r#"{"keyword": "x"}"#).unwrap();
        assert_eq!(removal.cluster_id, None);
        assert_eq!(ManualAssignment::match_key("  Red Yarn "), "red yarn");
    }
}
