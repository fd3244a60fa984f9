use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::keyword::ProcessedKeyword;
use crate::domain::values::bucket::Bucket;
use crate::domain::values::cluster_origin::ClusterOrigin;

/// A keyword as listed inside a cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMember {
    pub keyword: String,
    pub volume: u64,
    pub position: Option<u32>,
    pub bucket: Bucket,
}

impl From<&ProcessedKeyword> for ClusterMember {
    fn from(kw: &ProcessedKeyword) -> Self {
        Self {
            keyword: kw.raw.clone(),
            volume: kw.volume,
            position: kw.position,
            bucket: kw.bucket.clone(),
        }
    }
}

/// The four tiered sub-scores behind an opportunity score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityBreakdown {
    pub demand: u32,
    pub visibility_gap: u32,
    pub coverage: u32,
    pub commerciality: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub label: String,
    pub size: usize,
    pub total_volume: u64,
    pub avg_position: f64,
    pub bucket_mix: BTreeMap<Bucket, usize>,
    pub origin: ClusterOrigin,
    pub opportunity_score: u32,
    pub opportunity_breakdown: OpportunityBreakdown,
    pub members: Vec<ClusterMember>,
    pub is_locked: bool,
}

impl Cluster {
    /// Build an unscored cluster; aggregates are derived from `members`.
    pub fn new(id: String, label: String, origin: ClusterOrigin, members: Vec<ClusterMember>) -> Self {
        let mut cluster = Self {
            id,
            label,
            size: 0,
            total_volume: 0,
            avg_position: 0.0,
            bucket_mix: BTreeMap::new(),
            origin,
            opportunity_score: 0,
            opportunity_breakdown: OpportunityBreakdown::default(),
            members,
            is_locked: false,
        };
        cluster.recompute();
        cluster
    }

    /// Append members and refresh size, volume, position and bucket mix.
    pub fn extend(&mut self, members: impl IntoIterator<Item = ClusterMember>) {
        self.members.extend(members);
        self.recompute();
    }

    /// Share of members in the commercial bucket, as a percentage.
    pub fn commercial_percentage(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        let commercial = self
            .members
            .iter()
            .filter(|m| m.bucket.is_commercial())
            .count();
        commercial as f64 / self.size as f64 * 100.0
    }

    fn recompute(&mut self) {
        self.size = self.members.len();
        self.total_volume = self.members.iter().map(|m| m.volume).sum();

        let positions: Vec<u32> = self.members.iter().filter_map(|m| m.position).collect();
        self.avg_position = if positions.is_empty() {
            0.0
        } else {
            positions.iter().map(|p| *p as f64).sum::<f64>() / positions.len() as f64
        };

        self.bucket_mix.clear();
        for m in &self.members {
            *self.bucket_mix.entry(m.bucket.clone()).or_default() += 1;
        }
    }
}
