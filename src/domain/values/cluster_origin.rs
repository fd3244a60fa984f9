use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a realized cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterOrigin {
    /// Similarity group large enough on its own.
    Auto,
    /// Undersized group promoted on combined search volume.
    VolumeCombined,
    /// Single keyword promoted on its own search volume.
    VolumeSingle,
    /// Built only from manually pinned keywords.
    Manual,
    /// Automatic cluster extended with manually pinned keywords.
    Hybrid,
}

impl fmt::Display for ClusterOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterOrigin::Auto => write!(f, "auto"),
            ClusterOrigin::VolumeCombined => write!(f, "volume_combined"),
            ClusterOrigin::VolumeSingle => write!(f, "volume_single"),
            ClusterOrigin::Manual => write!(f, "manual"),
            ClusterOrigin::Hybrid => write!(f, "hybrid"),
        }
    }
}
