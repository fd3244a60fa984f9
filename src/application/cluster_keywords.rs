//! Cluster keywords use case — runs the full pipeline for one request.
//!
//! normalize → pull manual pins → (partition by bucket) → vectorize →
//! agglomerative merge → promotion → manual overlay → locks → ranking.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::agglomerative::{cluster, raw_groups};
use crate::application::manual_overlay::{apply_locks, apply_manual, pull_manual, ManualPins};
use crate::application::normalize::{extract_topic, normalize};
use crate::application::opportunity_score::score_cluster;
use crate::application::promotion::{realize_clusters, PromotionPolicy};
use crate::config::ClusterDefaults;
use crate::domain::entities::cluster::Cluster;
use crate::domain::entities::keyword::{KeywordRecord, ManualAssignment, ProcessedKeyword};
use crate::domain::error::DomainError;
use crate::domain::ports::vectorizer::Vectorizer;
use crate::domain::values::bucket::Bucket;
use crate::domain::values::cluster_id::ClusterIdGenerator;
use crate::domain::values::cluster_policy::ClusterPolicy;
use crate::domain::values::granularity::Granularity;
use crate::domain::values::unclustered_reason::UnclusteredReason;
use crate::domain::values::volume_stats::VolumeStats;

/// Input to one clustering run. Unset options take the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    #[serde(default)]
    pub keywords: Vec<KeywordRecord>,
    #[serde(default)]
    pub granularity: Option<Granularity>,
    #[serde(default)]
    pub min_cluster_size: Option<usize>,
    #[serde(default)]
    pub cluster_policy: Option<ClusterPolicy>,
    #[serde(default)]
    pub manual_assignments: Vec<ManualAssignment>,
    #[serde(default)]
    pub locked_clusters: Vec<String>,
}

impl ClusterRequest {
    pub fn new(keywords: Vec<KeywordRecord>) -> Self {
        Self {
            keywords,
            ..Default::default()
        }
    }

    /// Parse either a full request object or a bare array of keyword records.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let keywords: Vec<KeywordRecord> = serde_json::from_value(value)?;
            return Ok(Self::new(keywords));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonCounts {
    pub below_min_cluster_size: usize,
    pub insufficient_similarity: usize,
    pub empty_after_normalization: usize,
    pub manual_removed: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnclusteredSummary {
    pub total: usize,
    pub percentage: f64,
    pub by_reason: ReasonCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub keywords_considered: usize,
    pub clusters_created: usize,
    pub clustered_keywords: usize,
    pub unclustered_keywords: usize,
    pub unclustered_percentage: f64,
    pub similarity_threshold: f64,
}

/// Result of one clustering run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRun {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub clusters: Vec<Cluster>,
    pub keywords: Vec<ProcessedKeyword>,
    pub unclustered_summary: UnclusteredSummary,
    pub stats: RunStats,
}

/// Options resolved against the defaults and validated.
#[derive(Debug, Clone, Copy)]
struct RunSettings {
    threshold: f64,
    min_cluster_size: usize,
    policy: ClusterPolicy,
}

pub struct ClusterKeywordsUseCase {
    vectorizer: Arc<dyn Vectorizer>,
    defaults: ClusterDefaults,
}

impl ClusterKeywordsUseCase {
    pub fn new(vectorizer: Arc<dyn Vectorizer>, defaults: ClusterDefaults) -> Self {
        Self {
            vectorizer,
            defaults,
        }
    }

    pub fn execute(&self, request: &ClusterRequest) -> Result<ClusterRun, DomainError> {
        let settings = self.resolve(request)?;
        info!(
            "Clustering started - keywords={}, policy={}, threshold={:.3}, min_cluster_size={}, vectorizer={}",
            request.keywords.len(),
            settings.policy,
            settings.threshold,
            settings.min_cluster_size,
            self.vectorizer.name()
        );

        let mut keywords: Vec<ProcessedKeyword> = request
            .keywords
            .iter()
            .map(|rec| {
                let normalized = normalize(&rec.keyword);
                let topic = extract_topic(&normalized);
                ProcessedKeyword::new(rec, normalized, topic)
            })
            .collect();

        let pins = ManualPins::new(&request.manual_assignments);
        pull_manual(&mut keywords, &pins);

        let mut candidates = Vec::new();
        for (i, kw) in keywords.iter_mut().enumerate() {
            if kw.is_manual {
                continue;
            }
            if kw.topic_text.is_empty() {
                kw.mark_unclustered(UnclusteredReason::EmptyAfterNormalization);
            } else {
                candidates.push(i);
            }
        }

        let partitions = match settings.policy {
            ClusterPolicy::Topic => vec![(ClusterIdGenerator::new(), candidates.clone())],
            ClusterPolicy::BucketSeparated => bucket_partitions(&keywords, &candidates),
        };
        for (_, members) in &partitions {
            if members.len() > self.defaults.max_keywords {
                return Err(DomainError::InvalidInput(format!(
                    "Too many clusterable keywords in one pool: {} (limit {})",
                    members.len(),
                    self.defaults.max_keywords
                )));
            }
        }

        let mut clusters = Vec::new();
        for (mut ids, members) in partitions {
            clusters.extend(self.run_partition(&mut keywords, &members, &settings, &mut ids));
        }

        let run_stats = VolumeStats::from_volumes(candidates.iter().map(|&i| keywords[i].volume));
        clusters = apply_manual(&mut keywords, clusters, &run_stats);

        let locked: HashSet<String> = request.locked_clusters.iter().cloned().collect();
        apply_locks(&mut clusters, &locked);
        rank_clusters(&mut clusters);

        let unclustered_summary = summarize_unclustered(&keywords);
        let stats = RunStats {
            keywords_considered: keywords.len(),
            clusters_created: clusters.len(),
            clustered_keywords: keywords.iter().filter(|k| k.is_clustered()).count(),
            unclustered_keywords: unclustered_summary.total,
            unclustered_percentage: unclustered_summary.percentage,
            similarity_threshold: round_to(settings.threshold, 4),
        };

        info!(
            "Clustering done - clusters={}, clustered={}, unclustered={} ({}%)",
            stats.clusters_created,
            stats.clustered_keywords,
            stats.unclustered_keywords,
            stats.unclustered_percentage
        );

        Ok(ClusterRun {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            clusters,
            keywords,
            unclustered_summary,
            stats,
        })
    }

    fn resolve(&self, request: &ClusterRequest) -> Result<RunSettings, DomainError> {
        if request.keywords.is_empty() {
            return Err(DomainError::InvalidInput("No keywords supplied".into()));
        }
        let min_cluster_size = request
            .min_cluster_size
            .unwrap_or(self.defaults.min_cluster_size);
        if min_cluster_size < 1 {
            return Err(DomainError::InvalidInput(
                "minClusterSize must be at least 1".into(),
            ));
        }
        let granularity = request.granularity.unwrap_or(self.defaults.granularity);
        Ok(RunSettings {
            threshold: granularity.threshold(),
            min_cluster_size,
            policy: request.cluster_policy.unwrap_or(self.defaults.policy),
        })
    }

    /// Vectorize, merge, promote and score one candidate pool.
    fn run_partition(
        &self,
        keywords: &mut [ProcessedKeyword],
        candidates: &[usize],
        settings: &RunSettings,
        ids: &mut ClusterIdGenerator,
    ) -> Vec<Cluster> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let stats = VolumeStats::from_volumes(candidates.iter().map(|&i| keywords[i].volume));
        let texts: Vec<String> = candidates
            .iter()
            .map(|&i| keywords[i].topic_text.clone())
            .collect();
        let vectors = self.vectorizer.vectorize(&texts);
        let assignment = cluster(&vectors, settings.threshold);
        let groups = raw_groups(&assignment);

        let policy = PromotionPolicy::new(settings.min_cluster_size, stats);
        let mut clusters = realize_clusters(keywords, candidates, &groups, &policy, ids);
        for c in clusters.iter_mut() {
            score_cluster(c, &stats);
        }
        clusters
    }
}

/// Split candidates by bucket, each with its own id namespace. Buckets
/// whose tags coincide (e.g. `b2b` and `b-b`) get a numeric suffix so ids
/// never collide.
fn bucket_partitions(
    keywords: &[ProcessedKeyword],
    candidates: &[usize],
) -> Vec<(ClusterIdGenerator, Vec<usize>)> {
    let mut by_bucket: BTreeMap<&Bucket, Vec<usize>> = BTreeMap::new();
    for &i in candidates {
        by_bucket.entry(&keywords[i].bucket).or_default().push(i);
    }

    let mut tag_uses: HashMap<String, usize> = HashMap::new();
    by_bucket
        .into_iter()
        .map(|(bucket, members)| {
            let tag = bucket.tag();
            let uses = tag_uses.entry(tag.clone()).or_default();
            *uses += 1;
            let ids = if *uses == 1 {
                ClusterIdGenerator::for_bucket(bucket)
            } else {
                ClusterIdGenerator::with_prefix(format!("{}_{}", tag, uses))
            };
            debug!("Bucket partition - bucket={}, keywords={}", bucket, members.len());
            (ids, members)
        })
        .collect()
}

/// Highest opportunity first; volume then id keep the order stable.
pub fn rank_clusters(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| {
        b.opportunity_score
            .cmp(&a.opportunity_score)
            .then_with(|| b.total_volume.cmp(&a.total_volume))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn summarize_unclustered(keywords: &[ProcessedKeyword]) -> UnclusteredSummary {
    let mut by_reason = ReasonCounts::default();
    for kw in keywords {
        match kw.unclustered_reason {
            Some(UnclusteredReason::BelowMinClusterSize) => by_reason.below_min_cluster_size += 1,
            Some(UnclusteredReason::InsufficientSimilarity) => by_reason.insufficient_similarity += 1,
            Some(UnclusteredReason::EmptyAfterNormalization) => by_reason.empty_after_normalization += 1,
            Some(UnclusteredReason::ManualRemoved) => by_reason.manual_removed += 1,
            None => {}
        }
    }
    let total = by_reason.below_min_cluster_size
        + by_reason.insufficient_similarity
        + by_reason.empty_after_normalization
        + by_reason.manual_removed;
    let percentage = if keywords.is_empty() {
        0.0
    } else {
        round_to(total as f64 / keywords.len() as f64 * 100.0, 1)
    };
    UnclusteredSummary {
        total,
        percentage,
        by_reason,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
