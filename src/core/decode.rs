//! Decoding of delimited raw sensor strings into numeric columns.
//!
//! Raw strings hold records separated by `;`, each record holding fields
//! separated by `,`. Decoding is tolerant: a field that does not start
//! with an integer becomes NaN and flows through the rest of the
//! pipeline instead of being dropped.

use crate::core::series::{DecodedTrack, GaitSeries, HeartRateSeries, PositionSeries};
use crate::record::{RawRecord, WorkoutDetail};
use tracing::warn;

/// Separates samples within a raw string.
pub const RECORD_DELIMITER: char = ';';

/// Separates fields within a sample.
pub const FIELD_DELIMITER: char = ',';

/// Where one output column comes from inside a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Zero-based field position within the record
    pub index: usize,
    /// Value used when the field is missing or empty
    pub default: Option<f64>,
}

impl FieldSpec {
    pub const fn at(index: usize) -> Self {
        Self {
            index,
            default: None,
        }
    }

    pub const fn with_default(index: usize, default: f64) -> Self {
        Self {
            index,
            default: Some(default),
        }
    }
}

/// Splits a raw string into parallel numeric columns.
///
/// The decoder's arity is the number of field specs it was built with;
/// `decode` always returns exactly that many columns, all of equal length.
#[derive(Debug, Clone)]
pub struct RawSeriesDecoder {
    fields: Vec<FieldSpec>,
}

impl RawSeriesDecoder {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Decoder reading the first `arity` fields with no defaults.
    pub fn with_arity(arity: usize) -> Self {
        Self::new((0..arity).map(FieldSpec::at).collect())
    }

    pub fn decode(&self, raw: &str) -> Vec<Vec<f64>> {
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); self.fields.len()];

        for record in split_records(raw) {
            let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
            for (spec, column) in self.fields.iter().zip(columns.iter_mut()) {
                let value = match (fields.get(spec.index), spec.default) {
                    (Some(field), Some(default)) if field.is_empty() => default,
                    (Some(field), _) => parse_int(field),
                    (None, Some(default)) => default,
                    (None, None) => f64::NAN,
                };
                column.push(value);
            }
        }

        columns
    }

    /// Decode a single-field string into one column.
    pub fn decode_single(raw: &str) -> Vec<f64> {
        Self::with_arity(1).decode(raw).pop().unwrap_or_default()
    }
}

/// Non-empty records of a raw string.
pub fn split_records(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(RECORD_DELIMITER).filter(|r| !r.is_empty())
}

/// Parse the leading integer of a field.
///
/// Leading whitespace and a sign are accepted, trailing garbage is
/// ignored (`"12abc"` is 12). A field with no leading digits is NaN.
pub fn parse_int(field: &str) -> f64 {
    let s = field.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return f64::NAN;
    }

    // Parsing as f64 keeps integers beyond i64 range instead of failing.
    let value: f64 = digits[..end].parse().unwrap_or(f64::NAN);
    if negative {
        -value
    } else {
        value
    }
}

/// Decode the position clock, coordinates and altitude.
///
/// Coordinates and altitude share the `time` clock. A value column that
/// disagrees with it is padded with NaN or cut to the clock's length. An
/// empty altitude string stays empty and means the track has no
/// elevation. Without coordinates or without a clock there is no position
/// data at all.
pub fn decode_position(detail: &WorkoutDetail) -> PositionSeries {
    let mut coords = RawSeriesDecoder::with_arity(2)
        .decode(detail.longitude_latitude())
        .into_iter();
    let latitude = coords.next().unwrap_or_default();
    let longitude = coords.next().unwrap_or_default();

    let times = RawSeriesDecoder::decode_single(detail.time());
    let altitude = RawSeriesDecoder::decode_single(detail.altitude());

    let samples = times.len();
    if latitude.is_empty() || samples == 0 {
        return PositionSeries::default();
    }
    if latitude.len() != samples || !(altitude.is_empty() || altitude.len() == samples) {
        warn!(
            clock = samples,
            coordinates = latitude.len(),
            altitude = altitude.len(),
            "Position clock disagrees with its samples; aligning to the clock"
        );
    }

    PositionSeries {
        times,
        latitude: conform(latitude, samples),
        longitude: conform(longitude, samples),
        altitude: conform(altitude, samples),
    }
}

/// Pad a non-empty column with NaN, or cut it, to exactly `len` samples.
fn conform(mut column: Vec<f64>, len: usize) -> Vec<f64> {
    if !column.is_empty() {
        column.resize(len, f64::NAN);
    }
    column
}

/// Decode `time_delta,hr_delta` records. A missing time delta counts as 1.
pub fn decode_heart_rate(raw: &str) -> HeartRateSeries {
    let decoder =
        RawSeriesDecoder::new(vec![FieldSpec::with_default(0, 1.0), FieldSpec::at(1)]);
    let mut columns = decoder.decode(raw).into_iter();

    HeartRateSeries {
        times: columns.next().unwrap_or_default(),
        bpm: columns.next().unwrap_or_default(),
    }
}

/// Decode `time_delta,_,stride,cadence` records.
pub fn decode_gait(raw: &str) -> GaitSeries {
    let decoder =
        RawSeriesDecoder::new(vec![FieldSpec::at(0), FieldSpec::at(2), FieldSpec::at(3)]);
    let mut columns = decoder.decode(raw).into_iter();

    GaitSeries {
        times: columns.next().unwrap_or_default(),
        stride: columns.next().unwrap_or_default(),
        cadence: columns.next().unwrap_or_default(),
    }
}

/// Decode every signal of a record.
pub fn decode_record(record: &RawRecord) -> DecodedTrack {
    let detail = &record.detail;

    DecodedTrack {
        start_epoch: record.summary.start_epoch(),
        position: decode_position(detail),
        heart_rate: decode_heart_rate(detail.heart_rate()),
        gait: decode_gait(detail.gait()),
    }
}
