use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest similarity threshold (granularity 0).
pub const MIN_THRESHOLD: f64 = 0.25;
/// Span added on top of [`MIN_THRESHOLD`] at granularity 100.
pub const THRESHOLD_SPAN: f64 = 0.45;

/// Caller-facing 0–100 dial; higher means tighter clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Granularity(u32);

impl Granularity {
    pub fn new(value: u32) -> Result<Self, String> {
        if value > 100 {
            return Err(format!("Granularity must be between 0 and 100, got {value}"));
        }
        Ok(Granularity(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Similarity a merge must strictly exceed: 0 → 0.25, 100 → 0.70.
    pub fn threshold(&self) -> f64 {
        MIN_THRESHOLD + (self.0 as f64 / 100.0) * THRESHOLD_SPAN
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity(50)
    }
}

impl TryFrom<u32> for Granularity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Granularity::new(value)
    }
}

impl From<Granularity> for u32 {
    fn from(g: Granularity) -> Self {
        g.0
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
