//! Typed per-signal series, as decoded from a raw record.
//!
//! Every column of a series is sampled on that series' own `times`
//! column, which still holds relative deltas at this stage.

use crate::core::error::MergeError;

/// Position and altitude, sampled on the track clock.
///
/// `latitude` and `longitude` are delta-encoded fixed-point values.
/// `altitude` is absolute (centimeters) and may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSeries {
    pub times: Vec<f64>,
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub altitude: Vec<f64>,
}

impl PositionSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        let expected = self.times.len();
        MergeError::check_len("position.latitude", expected, self.latitude.len())?;
        MergeError::check_len("position.longitude", expected, self.longitude.len())?;
        if !self.altitude.is_empty() {
            MergeError::check_len("position.altitude", expected, self.altitude.len())?;
        }
        Ok(())
    }
}

/// Heart rate; `bpm` is delta-encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeartRateSeries {
    pub times: Vec<f64>,
    pub bpm: Vec<f64>,
}

impl HeartRateSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        MergeError::check_len("heart_rate.bpm", self.times.len(), self.bpm.len())
    }
}

/// Stride and cadence, both absolute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaitSeries {
    pub times: Vec<f64>,
    pub stride: Vec<f64>,
    pub cadence: Vec<f64>,
}

impl GaitSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        MergeError::check_len("gait.stride", self.times.len(), self.stride.len())?;
        MergeError::check_len("gait.cadence", self.times.len(), self.cadence.len())
    }
}

/// All signals of one workout, decoded but not yet accumulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedTrack {
    /// Track start in epoch seconds
    pub start_epoch: i64,
    pub position: PositionSeries,
    pub heart_rate: HeartRateSeries,
    pub gait: GaitSeries,
}

impl DecodedTrack {
    pub fn validate(&self) -> Result<(), MergeError> {
        self.position.validate()?;
        self.heart_rate.validate()?;
        self.gait.validate()
    }
}
