use crate::domain::values::bucket::Bucket;

/// Per-run sequential cluster id source.
///
/// Ids are unique within one generator and carry no meaning across runs.
#[derive(Debug, Clone, Default)]
pub struct ClusterIdGenerator {
    prefix: Option<String>,
    next: u32,
}

impl ClusterIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose ids read `{prefix}_cluster_{n}`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            next: 0,
        }
    }

    /// Generator whose ids are namespaced by the bucket's tag.
    pub fn for_bucket(bucket: &Bucket) -> Self {
        Self::with_prefix(bucket.tag())
    }

    pub fn next_id(&mut self) -> String {
        self.next += 1;
        match &self.prefix {
            Some(prefix) => format!("{}_cluster_{}", prefix, self.next),
            None => format!("cluster_{}", self.next),
        }
    }
}
