use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a keyword did not end up in any cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnclusteredReason {
    BelowMinClusterSize,
    InsufficientSimilarity,
    EmptyAfterNormalization,
    ManualRemoved,
}

impl fmt::Display for UnclusteredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinClusterSize => write!(f, "below_min_cluster_size"),
            Self::InsufficientSimilarity => write!(f, "insufficient_similarity"),
            Self::EmptyAfterNormalization => write!(f, "empty_after_normalization"),
            Self::ManualRemoved => write!(f, "manual_removed"),
        }
    }
}
