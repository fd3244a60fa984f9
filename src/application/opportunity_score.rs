//! Opportunity scoring for realized clusters.
//!
//! Four tiered sub-scores, each 20/40/70/100:
//! - demand: total volume against the run's P75/P95
//! - visibility gap: average SERP position (worse ranking, bigger gap)
//! - coverage: keyword count
//! - commerciality: share of keywords in the buy bucket
//!
//! Final score = `round(0.35·demand + 0.35·gap + 0.20·coverage + 0.10·commerciality)`.

use crate::domain::entities::cluster::{Cluster, OpportunityBreakdown};
use crate::domain::values::volume_stats::VolumeStats;

pub const DEMAND_WEIGHT: f64 = 0.35;
pub const VISIBILITY_WEIGHT: f64 = 0.35;
pub const COVERAGE_WEIGHT: f64 = 0.20;
pub const COMMERCIAL_WEIGHT: f64 = 0.10;

pub fn demand_score(total_volume: u64, stats: &VolumeStats) -> u32 {
    let v = total_volume as f64;
    if v >= stats.p95 as f64 {
        100
    } else if v >= stats.p75 as f64 {
        70
    } else if v >= stats.p75 as f64 / 2.0 {
        40
    } else {
        20
    }
}

pub fn visibility_gap_score(avg_position: f64) -> u32 {
    if avg_position > 20.0 {
        100
    } else if avg_position > 10.0 {
        70
    } else if avg_position > 5.0 {
        40
    } else {
        20
    }
}

pub fn coverage_score(size: usize) -> u32 {
    match size {
        s if s >= 20 => 100,
        s if s >= 10 => 70,
        s if s >= 5 => 40,
        _ => 20,
    }
}

pub fn commerciality_score(commercial_pct: f64) -> u32 {
    if commercial_pct >= 70.0 {
        100
    } else if commercial_pct >= 50.0 {
        70
    } else if commercial_pct >= 30.0 {
        40
    } else {
        20
    }
}

pub fn breakdown(cluster: &Cluster, stats: &VolumeStats) -> OpportunityBreakdown {
    OpportunityBreakdown {
        demand: demand_score(cluster.total_volume, stats),
        visibility_gap: visibility_gap_score(cluster.avg_position),
        coverage: coverage_score(cluster.size),
        commerciality: commerciality_score(cluster.commercial_percentage()),
    }
}

/// Weighted, rounded composite of a breakdown.
pub fn composite(b: &OpportunityBreakdown) -> u32 {
    let weighted = DEMAND_WEIGHT * b.demand as f64
        + VISIBILITY_WEIGHT * b.visibility_gap as f64
        + COVERAGE_WEIGHT * b.coverage as f64
        + COMMERCIAL_WEIGHT * b.commerciality as f64;
    weighted.round() as u32
}

/// Score a cluster in place.
pub fn score_cluster(cluster: &mut Cluster, stats: &VolumeStats) {
    let b = breakdown(cluster, stats);
    cluster.opportunity_score = composite(&b);
    cluster.opportunity_breakdown = b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::cluster::ClusterMember;
    use crate::domain::values::bucket::Bucket;
    use crate::domain::values::cluster_origin::ClusterOrigin;

    const STATS: VolumeStats = VolumeStats {
        p75: 1000,
        p80: 1200,
        p95: 5000,
    };

    #[test]
    fn test_demand_tiers() {
        assert_eq!(demand_score(5000, &STATS), 100);
        assert_eq!(demand_score(1000, &STATS), 70);
        assert_eq!(demand_score(500, &STATS), 40);
        assert_eq!(demand_score(499, &STATS), 20);
    }

    #[test]
    fn test_visibility_tiers_are_strict() {
        assert_eq!(visibility_gap_score(20.5), 100);
        assert_eq!(visibility_gap_score(20.0), 70);
        assert_eq!(visibility_gap_score(10.0), 40);
        assert_eq!(visibility_gap_score(5.0), 20);
        assert_eq!(visibility_gap_score(0.0), 20);
    }

    #[test]
    fn test_coverage_tiers() {
        assert_eq!(coverage_score(20), 100);
        assert_eq!(coverage_score(10), 70);
        assert_eq!(coverage_score(5), 40);
        assert_eq!(coverage_score(4), 20);
    }

    #[test]
    fn test_commerciality_tiers() {
        assert_eq!(commerciality_score(70.0), 100);
        assert_eq!(commerciality_score(50.0), 70);
        assert_eq!(commerciality_score(30.0), 40);
        assert_eq!(commerciality_score(29.9), 20);
    }

    #[test]
    fn test_composite_bounds() {
        let floor = OpportunityBreakdown {
            demand: 20,
            visibility_gap: 20,
            coverage: 20,
            commerciality: 20,
        };
        let ceiling = OpportunityBreakdown {
            demand: 100,
            visibility_gap: 100,
            coverage: 100,
            commerciality: 100,
        };
        assert_eq!(composite(&floor), 20);
        assert_eq!(composite(&ceiling), 100);
    }

    #[test]
    fn test_composite_weights() {
        // 0.35*70 + 0.35*70 + 0.2*40 + 0.1*20 = 24.5 + 24.5 + 8 + 2
        let b = OpportunityBreakdown {
            demand: 70,
            visibility_gap: 70,
            coverage: 40,
            commerciality: 20,
        };
        assert_eq!(composite(&b), 59);
    }

    #[test]
    fn test_score_cluster() {
        let members = (0..10)
            .map(|i| ClusterMember {
                keyword: format!("kw {i}"),
                volume: 600,
                position: Some(25),
                bucket: if i < 8 { Bucket::Buy } else { Bucket::Learn },
            })
            .collect();
        let mut cluster = Cluster::new("c".into(), "C".into(), ClusterOrigin::Auto, members);
        score_cluster(&mut cluster, &STATS);
        assert_eq!(
            cluster.opportunity_breakdown,
            OpportunityBreakdown {
                demand: 100,
                visibility_gap: 100,
                coverage: 70,
                commerciality: 100,
            }
        );
        // 35 + 35 + 14 + 10
        assert_eq!(cluster.opportunity_score, 94);
    }
}
