//! Master time axis construction.
//!
//! The axis is the sorted, duplicate-free union of the absolute time
//! columns of the position, heart-rate and gait series. Every signal is
//! resampled onto it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Cost time carried by the only observed caller of gap compaction.
pub const DEFAULT_COST_TIME: f64 = -1.0;

/// Absolute time offsets of each source series, in seconds from track start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTimes {
    pub track: Vec<f64>,
    pub heart_rate: Vec<f64>,
    pub gait: Vec<f64>,
}

impl SourceTimes {
    /// Sorted, de-duplicated union of all three columns.
    pub fn merged(&self) -> Vec<f64> {
        merge_axes(&[
            self.track.as_slice(),
            self.heart_rate.as_slice(),
            self.gait.as_slice(),
        ])
    }

    /// Shift every time at or after `from` by `change`, in all columns.
    fn shift_from(&mut self, from: f64, change: f64) {
        for column in [&mut self.track, &mut self.heart_rate, &mut self.gait] {
            for time in column.iter_mut().filter(|t| **t >= from) {
                *time += change;
            }
        }
    }
}

/// Sorted union of time columns with duplicates removed.
///
/// NaN offsets sort to the end and collapse into one entry.
pub fn merge_axes(columns: &[&[f64]]) -> Vec<f64> {
    let mut axis: Vec<f64> = columns.iter().flat_map(|c| c.iter().copied()).collect();
    axis.sort_by(|a, b| {
        a.partial_cmp(b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
    });
    axis.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
    axis
}

/// Long-gap compaction, applied after the axis is first built.
///
/// The trim budget is `last axis time - cost_time`. The only observed
/// caller passes a constant -1 as cost time, so when enabled this squeezes
/// every gap of the track down to one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapCompaction {
    pub cost_time: f64,
}

impl Default for GapCompaction {
    fn default() -> Self {
        Self {
            cost_time: DEFAULT_COST_TIME,
        }
    }
}

impl GapCompaction {
    /// Shrink the largest gaps until the trim budget runs out.
    ///
    /// Mutates `times` so later resampling sees the compacted clocks and
    /// returns the rebuilt axis.
    pub fn apply(&self, times: &mut SourceTimes, mut axis: Vec<f64>) -> Vec<f64> {
        let mut time_to_trim = match axis.last() {
            Some(last) if !times.track.is_empty() => last - self.cost_time,
            _ => 0.0,
        };
        if self.cost_time == DEFAULT_COST_TIME {
            warn!("Gap compaction is running with the placeholder cost time; trim budget is unreliable");
        }

        let mut iterations = 0usize;
        while time_to_trim > 0.0 {
            let (gap_end, gap) = largest_gap(&axis);
            let change = (gap - time_to_trim).max(1.0) - gap;

            // Every gap is already at one second or less.
            if change >= 0.0 || change.is_nan() {
                warn!(
                    remaining = time_to_trim,
                    iterations, "Gap compaction stalled with budget left; stopping"
                );
                break;
            }

            times.shift_from(gap_end, change);
            time_to_trim += change;
            axis = times.merged();
            iterations += 1;
        }

        debug!(iterations, axis_len = axis.len(), "Gap compaction finished");
        axis
    }
}

/// Right edge and width of the widest gap, measured from time zero.
fn largest_gap(axis: &[f64]) -> (f64, f64) {
    let mut last = 0.0;
    let mut widest = (0.0, 0.0);
    for &time in axis {
        let interval = time - last;
        last = time;
        if interval > widest.1 {
            widest = (time, interval);
        }
    }
    widest
}

/// Builds the master axis, optionally compacting long gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterAxisBuilder {
    compaction: Option<GapCompaction>,
}

impl MasterAxisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap_compaction(compaction: GapCompaction) -> Self {
        Self {
            compaction: Some(compaction),
        }
    }

    pub fn build(&self, times: &mut SourceTimes) -> Vec<f64> {
        let axis = times.merged();
        match self.compaction {
            Some(compaction) => compaction.apply(times, axis),
            None => axis,
        }
    }
}
