//! Environment-driven defaults for clustering runs.
//!
//! | Variable | Default |
//! |---|---|
//! | `KWCLUSTER_GRANULARITY` | 50 |
//! | `KWCLUSTER_MIN_CLUSTER_SIZE` | 2 |
//! | `KWCLUSTER_POLICY` | topic |
//! | `KWCLUSTER_MAX_KEYWORDS` | 2000 |

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::domain::values::cluster_policy::ClusterPolicy;
use crate::domain::values::granularity::Granularity;

pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
/// Upper bound on keywords per request; clustering cost grows cubically.
pub const DEFAULT_MAX_KEYWORDS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterDefaults {
    pub granularity: Granularity,
    pub min_cluster_size: usize,
    pub policy: ClusterPolicy,
    pub max_keywords: usize,
}

impl Default for ClusterDefaults {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            policy: ClusterPolicy::default(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl ClusterDefaults {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build defaults from an arbitrary variable source. Bad values are
    /// logged and replaced by the built-in default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let granularity = env_value::<u32, _>(&lookup, "KWCLUSTER_GRANULARITY")
            .and_then(|g| match Granularity::new(g) {
                Ok(g) => Some(g),
                Err(e) => {
                    warn!("Ignoring KWCLUSTER_GRANULARITY: {}", e);
                    None
                }
            })
            .unwrap_or(base.granularity);
        let min_cluster_size = env_value::<usize, _>(&lookup, "KWCLUSTER_MIN_CLUSTER_SIZE")
            .filter(|m| *m >= 1)
            .unwrap_or(base.min_cluster_size);
        let policy = env_value::<ClusterPolicy, _>(&lookup, "KWCLUSTER_POLICY").unwrap_or(base.policy);
        let max_keywords = env_value::<usize, _>(&lookup, "KWCLUSTER_MAX_KEYWORDS")
            .filter(|m| *m >= 1)
            .unwrap_or(base.max_keywords);

        Self {
            granularity,
            min_cluster_size,
            policy,
            max_keywords,
        }
    }
}

fn env_value<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
