//! Track point assembly.
//!
//! Accumulates the delta-encoded columns, builds the master axis, gap-fills
//! and resamples every signal onto it, then scales the fixed-point values
//! into one ordered sequence of track points.

use crate::core::accumulate::accumulate;
use crate::core::axis::{GapCompaction, MasterAxisBuilder, SourceTimes, DEFAULT_COST_TIME};
use crate::core::decode::decode_record;
use crate::core::error::MergeError;
use crate::core::gapfill::{Sentinel, SentinelGapFiller};
use crate::core::resample::LinearInterpolator;
use crate::core::series::DecodedTrack;
use crate::record::{RawRecord, WorkoutSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Latitude and longitude are stored as degrees * 1e8.
pub const COORDINATE_SCALE: f64 = 100_000_000.0;

/// Altitude is stored in centimeters.
pub const ALTITUDE_SCALE: f64 = 100.0;

/// Tunables for the merge pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Raw value marking a missing sample
    pub sentinel: Sentinel,
    /// Compact long idle gaps on the master axis
    pub compact_gaps: bool,
    /// Cost time feeding the gap-compaction budget
    pub cost_time: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            sentinel: Sentinel::default(),
            compact_gaps: false,
            cost_time: DEFAULT_COST_TIME,
        }
    }
}

impl MergeOptions {
    fn axis_builder(&self) -> MasterAxisBuilder {
        if self.compact_gaps {
            MasterAxisBuilder::with_gap_compaction(GapCompaction {
                cost_time: self.cost_time,
            })
        } else {
            MasterAxisBuilder::new()
        }
    }
}

/// One fully-populated point of the merged track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPoint {
    /// Seconds since track start
    pub offset_secs: f64,
    /// Absolute time; `None` when the offset is not finite
    pub time: Option<DateTime<Utc>>,
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Meters; `None` when the workout has no altitude samples
    pub altitude: Option<f64>,
    /// Beats per minute; `None` when the workout has no heart-rate samples
    pub heart_rate: Option<f64>,
    /// Steps per minute; `None` when the workout has no gait samples
    pub cadence: Option<f64>,
    /// Stride length as recorded; `None` when the workout has no gait samples
    pub stride: Option<f64>,
}

impl TrackPoint {
    /// Epoch seconds of this point.
    pub fn epoch_seconds(&self, start_epoch: i64) -> f64 {
        start_epoch as f64 + self.offset_secs
    }
}

/// The assembled points of one workout, with its summary passed through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub summary: WorkoutSummary,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Turns raw workout records into tracks.
#[derive(Debug, Clone, Default)]
pub struct TrackAssembler {
    options: MergeOptions,
}

impl TrackAssembler {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Decode and assemble a whole record.
    pub fn assemble(&self, record: &RawRecord) -> Result<Track, MergeError> {
        let decoded = decode_record(record);
        let points = self.assemble_points(&decoded)?;

        debug!(
            trackid = record.summary.trackid,
            points = points.len(),
            "Assembled track"
        );

        Ok(Track {
            summary: record.summary.clone(),
            points,
        })
    }

    /// Assemble points from already-decoded series.
    ///
    /// A track with no position samples yields no points at all, whatever
    /// the other signals hold.
    pub fn assemble_points(&self, decoded: &DecodedTrack) -> Result<Vec<TrackPoint>, MergeError> {
        decoded.validate()?;

        let position = &decoded.position;
        let latitude = accumulate(&position.latitude);
        if latitude.is_empty() {
            debug!(start = decoded.start_epoch, "No position samples; skipping track");
            return Ok(Vec::new());
        }
        let longitude = accumulate(&position.longitude);
        let bpm = accumulate(&decoded.heart_rate.bpm);

        let mut times = SourceTimes {
            track: accumulate(&position.times),
            heart_rate: accumulate(&decoded.heart_rate.times),
            gait: accumulate(&decoded.gait.times),
        };
        let axis = self.options.axis_builder().build(&mut times);
        debug!(
            axis_len = axis.len(),
            track = times.track.len(),
            heart_rate = times.heart_rate.len(),
            gait = times.gait.len(),
            "Built master axis"
        );

        let filler = SentinelGapFiller::new(self.options.sentinel);
        let resample = |xs: &[f64], ys: &[f64]| -> Result<Option<Vec<f64>>, MergeError> {
            if ys.is_empty() {
                return Ok(None);
            }
            Ok(LinearInterpolator::new(xs, &filler.fill(ys))?.resample(&axis))
        };

        let (Some(latitude), Some(longitude)) = (
            resample(&times.track, &latitude)?,
            resample(&times.track, &longitude)?,
        ) else {
            return Ok(Vec::new());
        };
        let altitude = resample(&times.track, &position.altitude)?;
        let heart_rate = resample(&times.heart_rate, &bpm)?;
        let stride = resample(&times.gait, &decoded.gait.stride)?;
        let cadence = resample(&times.gait, &decoded.gait.cadence)?;

        let at = |column: &Option<Vec<f64>>, i: usize| column.as_ref().map(|c| c[i]);

        Ok(axis
            .iter()
            .enumerate()
            .map(|(i, &offset)| TrackPoint {
                offset_secs: offset,
                time: point_time(decoded.start_epoch, offset),
                latitude: latitude[i] / COORDINATE_SCALE,
                longitude: longitude[i] / COORDINATE_SCALE,
                altitude: at(&altitude, i).map(|alt| alt / ALTITUDE_SCALE),
                heart_rate: at(&heart_rate, i),
                cadence: at(&cadence, i),
                stride: at(&stride, i),
            })
            .collect())
    }
}

/// Absolute time of an axis offset, at millisecond precision.
fn point_time(start_epoch: i64, offset_secs: f64) -> Option<DateTime<Utc>> {
    let millis = (start_epoch as f64 + offset_secs) * 1000.0;
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Run the whole pipeline on one record.
pub fn assemble_record(record: &RawRecord, options: &MergeOptions) -> Result<Track, MergeError> {
    TrackAssembler::new(*options).assemble(record)
}
