//! Shared test helpers.
#![allow(dead_code)]

use kwcluster::application::cluster_keywords::{ClusterRequest, ClusterRun};
use kwcluster::config::ClusterDefaults;
use kwcluster::domain::entities::cluster::Cluster;
use kwcluster::domain::entities::keyword::{KeywordRecord, ProcessedKeyword};
use kwcluster::domain::values::bucket::Bucket;
use kwcluster::infrastructure::vectorizers::tfidf::TfIdfVectorizer;
use kwcluster::KeywordClusterer;
use std::sync::Arc;

pub fn setup() -> KeywordClusterer {
    KeywordClusterer::with_options(ClusterDefaults::default(), Arc::new(TfIdfVectorizer))
}

pub fn record(keyword: &str, volume: u64, position: Option<u32>, bucket: Bucket) -> KeywordRecord {
    KeywordRecord::new(keyword, volume, position, bucket)
}

pub fn request(records: Vec<KeywordRecord>) -> ClusterRequest {
    ClusterRequest::new(records)
}

pub fn yarn_records(blue_volume: u64) -> Vec<KeywordRecord> {
    vec![
        record("red cotton yarn", 500, Some(12), Bucket::Buy),
        record("red cotton thread", 480, Some(8), Bucket::Buy),
        record("blue cotton yarn", blue_volume, None, Bucket::Learn),
    ]
}

pub fn keyword<'a>(run: &'a ClusterRun, raw: &str) -> &'a ProcessedKeyword {
    run.keywords
        .iter()
        .find(|k| k.raw == raw)
        .unwrap_or_else(|| panic!("keyword '{raw}' missing from run"))
}

pub fn cluster<'a>(run: &'a ClusterRun, id: &str) -> &'a Cluster {
    run.clusters
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("cluster '{id}' missing from run"))
}

pub fn member_keywords(cluster: &Cluster) -> Vec<String> {
    let mut kws: Vec<String> = cluster.members.iter().map(|m| m.keyword.clone()).collect();
    kws.sort();
    kws
}

/// Every keyword carries exactly one of a cluster id or an unclustered reason.
pub fn assert_partition(run: &ClusterRun) {
    for kw in &run.keywords {
        assert!(
            kw.cluster_id.is_some() != kw.unclustered_reason.is_some(),
            "keyword '{}' has cluster_id={:?} reason={:?}",
            kw.raw,
            kw.cluster_id,
            kw.unclustered_reason
        );
    }
    let clustered: usize = run.clusters.iter().map(|c| c.size).sum();
    assert_eq!(clustered, run.stats.clustered_keywords);
    assert_eq!(
        run.stats.clustered_keywords + run.stats.unclustered_keywords,
        run.keywords.len()
    );
}
