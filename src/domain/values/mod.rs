pub mod bucket;
pub mod cluster_id;
pub mod cluster_origin;
pub mod cluster_policy;
pub mod granularity;
pub mod term_vector;
pub mod unclustered_reason;
pub mod volume_stats;
