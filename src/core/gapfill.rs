//! Missing-sample handling.
//!
//! Upstream marks an absent sample with a reserved out-of-range integer.
//! That sentinel is converted to `None` at the boundary and gaps are
//! forward-filled before a column is resampled.

use serde::{Deserialize, Serialize};

/// The upstream "no value" marker.
pub const DEFAULT_SENTINEL: i64 = -2_000_000;

/// Reserved value marking a missing sample in a raw column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentinel(pub i64);

impl Default for Sentinel {
    fn default() -> Self {
        Self(DEFAULT_SENTINEL)
    }
}

impl Sentinel {
    pub fn value(&self) -> f64 {
        self.0 as f64
    }

    pub fn is_missing(&self, value: f64) -> bool {
        value == self.value()
    }

    /// Decode a sentinel-encoded column into optional samples.
    pub fn to_samples(&self, column: &[f64]) -> Vec<Option<f64>> {
        column
            .iter()
            .map(|&v| if self.is_missing(v) { None } else { Some(v) })
            .collect()
    }

    /// Encode optional samples back into a sentinel column.
    pub fn from_samples(&self, samples: &[Option<f64>]) -> Vec<f64> {
        samples
            .iter()
            .map(|s| s.unwrap_or_else(|| self.value()))
            .collect()
    }
}

/// Forward-fill missing samples.
///
/// Leading gaps take the first known value in the column. Returns `None`
/// when no sample is known at all (including an empty column).
pub fn fill_gaps(samples: &[Option<f64>]) -> Option<Vec<f64>> {
    let mut last = samples.iter().flatten().next().copied()?;

    Some(
        samples
            .iter()
            .map(|sample| {
                if let Some(value) = sample {
                    last = *value;
                }
                last
            })
            .collect(),
    )
}

/// Gap filler working on sentinel-encoded columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelGapFiller {
    sentinel: Sentinel,
}

impl SentinelGapFiller {
    pub fn new(sentinel: Sentinel) -> Self {
        Self { sentinel }
    }

    /// Replace every sentinel with the nearest preceding known value.
    ///
    /// A column that is entirely sentinel is returned unchanged.
    pub fn fill(&self, column: &[f64]) -> Vec<f64> {
        fill_gaps(&self.sentinel.to_samples(column)).unwrap_or_else(|| column.to_vec())
    }
}
