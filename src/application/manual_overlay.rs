//! Manual pinning and lock flags layered over automatic clustering.
//!
//! Pinned keywords never reach the vectorizer. Once automatic clusters
//! exist they are merged back in: into the automatic cluster with the same
//! id (which becomes [`ClusterOrigin::Hybrid`]) or into a new
//! [`ClusterOrigin::Manual`] cluster.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::application::label::cluster_label;
use crate::application::opportunity_score::score_cluster;
use crate::domain::entities::cluster::{Cluster, ClusterMember};
use crate::domain::entities::keyword::{ManualAssignment, ProcessedKeyword};
use crate::domain::values::cluster_origin::ClusterOrigin;
use crate::domain::values::unclustered_reason::UnclusteredReason;
use crate::domain::values::volume_stats::VolumeStats;

/// Manual assignments keyed by lowercase keyword; later entries win.
#[derive(Debug, Clone, Default)]
pub struct ManualPins {
    by_keyword: HashMap<String, Option<String>>,
}

impl ManualPins {
    pub fn new(assignments: &[ManualAssignment]) -> Self {
        let by_keyword = assignments
            .iter()
            .map(|a| (ManualAssignment::match_key(&a.keyword), a.cluster_id.clone()))
            .collect();
        Self { by_keyword }
    }

    /// `Some(Some(id))` for a pin, `Some(None)` for a removal.
    pub fn lookup(&self, keyword: &str) -> Option<&Option<String>> {
        self.by_keyword.get(&ManualAssignment::match_key(keyword))
    }

    pub fn is_empty(&self) -> bool {
        self.by_keyword.is_empty()
    }
}

/// Flag manually handled keywords and preset their cluster id (or removal
/// reason). Returns how many keywords were pulled out.
pub fn pull_manual(keywords: &mut [ProcessedKeyword], pins: &ManualPins) -> usize {
    if pins.is_empty() {
        return 0;
    }
    let mut pulled = 0usize;
    for kw in keywords.iter_mut() {
        let Some(pin) = pins.lookup(&kw.raw) else { continue };
        kw.is_manual = true;
        match pin {
            Some(id) => {
                kw.cluster_id = Some(id.clone());
                kw.unclustered_reason = None;
            }
            None => kw.mark_unclustered(UnclusteredReason::ManualRemoved),
        }
        pulled += 1;
    }
    debug!("Manual keywords pulled - count={}", pulled);
    pulled
}

/// Merge pinned keywords into `clusters`, scoring every cluster touched.
pub fn apply_manual(
    keywords: &mut [ProcessedKeyword],
    mut clusters: Vec<Cluster>,
    stats: &VolumeStats,
) -> Vec<Cluster> {
    // Pinned ids in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut pinned: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, kw) in keywords.iter().enumerate() {
        if !kw.is_manual {
            continue;
        }
        if let Some(id) = &kw.cluster_id {
            if !pinned.contains_key(id) {
                order.push(id.clone());
            }
            pinned.entry(id.clone()).or_default().push(i);
        }
    }

    let mut hybrid = 0usize;
    let mut manual = 0usize;

    for id in order {
        let indices = &pinned[&id];
        let members: Vec<ClusterMember> =
            indices.iter().map(|&i| ClusterMember::from(&keywords[i])).collect();

        let label = match clusters.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                existing.extend(members);
                existing.origin = ClusterOrigin::Hybrid;
                score_cluster(existing, stats);
                hybrid += 1;
                existing.label.clone()
            }
            None => {
                let label = cluster_label(indices.iter().map(|&i| &keywords[i]));
                let mut cluster = Cluster::new(id.clone(), label.clone(), ClusterOrigin::Manual, members);
                score_cluster(&mut cluster, stats);
                clusters.push(cluster);
                manual += 1;
                label
            }
        };

        for &i in indices {
            keywords[i].assign(&id, &label);
        }
    }

    if hybrid + manual > 0 {
        info!(
            "Manual overlay applied - hybrid_clusters={}, manual_clusters={}",
            hybrid, manual
        );
    }
    clusters
}

/// Flag clusters whose id the caller has locked. Clustering is unaffected.
pub fn apply_locks(clusters: &mut [Cluster], locked: &HashSet<String>) {
    for cluster in clusters.iter_mut() {
        cluster.is_locked = locked.contains(&cluster.id);
    }
}
