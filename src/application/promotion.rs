//! Turns raw similarity groups into realized clusters.
//!
//! A group is kept when it is big enough, or when search volume makes an
//! undersized group worth tracking anyway:
//!
//! 1. `size >= min_cluster_size` → [`ClusterOrigin::Auto`]
//! 2. `size > 1` and combined volume ≥ `max(P75, 800)` → [`ClusterOrigin::VolumeCombined`]
//! 3. `size == 1` and volume ≥ `max(P80, 300)` → [`ClusterOrigin::VolumeSingle`]
//!
//! Everything else is left unclustered: singletons found no similar
//! neighbour, larger groups were simply too small.

use tracing::{debug, info};

use crate::application::agglomerative::RawGroup;
use crate::application::label::cluster_label;
use crate::domain::entities::cluster::{Cluster, ClusterMember};
use crate::domain::entities::keyword::ProcessedKeyword;
use crate::domain::values::cluster_id::ClusterIdGenerator;
use crate::domain::values::cluster_origin::ClusterOrigin;
use crate::domain::values::unclustered_reason::UnclusteredReason;
use crate::domain::values::volume_stats::VolumeStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDecision {
    Accept(ClusterOrigin),
    Reject(UnclusteredReason),
}

#[derive(Debug, Clone, Copy)]
pub struct PromotionPolicy {
    pub min_cluster_size: usize,
    pub stats: VolumeStats,
}

impl PromotionPolicy {
    pub fn new(min_cluster_size: usize, stats: VolumeStats) -> Self {
        Self {
            min_cluster_size,
            stats,
        }
    }

    pub fn decide(&self, size: usize, total_volume: u64) -> GroupDecision {
        if size >= self.min_cluster_size {
            GroupDecision::Accept(ClusterOrigin::Auto)
        } else if size > 1 && total_volume >= self.stats.combined_volume_threshold() {
            GroupDecision::Accept(ClusterOrigin::VolumeCombined)
        } else if size == 1 && total_volume >= self.stats.single_volume_threshold() {
            GroupDecision::Accept(ClusterOrigin::VolumeSingle)
        } else if size == 1 {
            GroupDecision::Reject(UnclusteredReason::InsufficientSimilarity)
        } else {
            GroupDecision::Reject(UnclusteredReason::BelowMinClusterSize)
        }
    }
}

/// Apply the policy to each group in discovery order.
///
/// `candidates[m]` is the index in `keywords` of the group member `m`.
/// Accepted groups take the next id from `ids`; their members are assigned
/// in place, rejected members get an unclustered reason. Returned clusters
/// are unscored.
pub fn realize_clusters(
    keywords: &mut [ProcessedKeyword],
    candidates: &[usize],
    groups: &[RawGroup],
    policy: &PromotionPolicy,
    ids: &mut ClusterIdGenerator,
) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut rejected = 0usize;

    for group in groups {
        let indices: Vec<usize> = group.members.iter().map(|&m| candidates[m]).collect();
        let total_volume: u64 = indices.iter().map(|&i| keywords[i].volume).sum();

        match policy.decide(group.size(), total_volume) {
            GroupDecision::Accept(origin) => {
                let id = ids.next_id();
                let label = cluster_label(indices.iter().map(|&i| &keywords[i]));
                let members: Vec<ClusterMember> =
                    indices.iter().map(|&i| ClusterMember::from(&keywords[i])).collect();
                for &i in &indices {
                    keywords[i].assign(&id, &label);
                }
                debug!(
                    "Cluster realized - id={}, origin={}, size={}, volume={}",
                    id,
                    origin,
                    members.len(),
                    total_volume
                );
                clusters.push(Cluster::new(id, label, origin, members));
            }
            GroupDecision::Reject(reason) => {
                rejected += 1;
                for &i in &indices {
                    keywords[i].mark_unclustered(reason);
                }
            }
        }
    }

    info!(
        "Promotion done - groups={}, clusters={}, rejected_groups={}, combined_threshold={}, single_threshold={}",
        groups.len(),
        clusters.len(),
        rejected,
        policy.stats.combined_volume_threshold(),
        policy.stats.single_volume_threshold()
    );
    clusters
}
