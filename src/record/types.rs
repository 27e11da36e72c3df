//! Input value types for a single workout.
//!
//! Field names follow the upstream JSON payload so records can be
//! deserialized directly from what the data source returns.

use serde::{Deserialize, Serialize};

/// Workout summary, passed through untouched to the caller with the points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Track start, in epoch seconds. Doubles as the workout id upstream.
    #[serde(with = "epoch_serde")]
    pub trackid: i64,
    /// Total distance as reported by the device
    #[serde(default = "nan", with = "float_serde")]
    pub dis: f64,
    /// Workout type code
    #[serde(rename = "type", default)]
    pub workout_type: i64,
    /// Upstream source identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// End time, in epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<serde_json::Value>,
}

impl WorkoutSummary {
    pub fn new(trackid: i64) -> Self {
        Self {
            trackid,
            dis: f64::NAN,
            workout_type: 0,
            source: None,
            end_time: None,
        }
    }

    /// Start of the track in epoch seconds.
    pub fn start_epoch(&self) -> i64 {
        self.trackid
    }
}

/// Per-sensor raw strings. `;` separates records, `,` separates fields.
///
/// An absent string and an empty string both mean "no samples".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDetail {
    /// `lat_delta,lon_delta` per record
    #[serde(default)]
    pub longitude_latitude: Option<String>,
    /// Position clock: one time delta per position record
    #[serde(default)]
    pub time: Option<String>,
    /// Altitude in centimeters, one value per position record
    #[serde(default)]
    pub altitude: Option<String>,
    /// `time_delta,hr_delta` per record
    #[serde(default)]
    pub heart_rate: Option<String>,
    /// `time_delta,_,stride,cadence` per record
    #[serde(default)]
    pub gait: Option<String>,
}

impl WorkoutDetail {
    pub fn longitude_latitude(&self) -> &str {
        self.longitude_latitude.as_deref().unwrap_or_default()
    }

    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    pub fn altitude(&self) -> &str {
        self.altitude.as_deref().unwrap_or_default()
    }

    pub fn heart_rate(&self) -> &str {
        self.heart_rate.as_deref().unwrap_or_default()
    }

    pub fn gait(&self) -> &str {
        self.gait.as_deref().unwrap_or_default()
    }
}

/// A workout summary paired with its detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub summary: WorkoutSummary,
    #[serde(default)]
    pub detail: WorkoutDetail,
}

impl RawRecord {
    pub fn new(summary: WorkoutSummary, detail: WorkoutDetail) -> Self {
        Self { summary, detail }
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Serde support for epoch seconds sent either as a number or a numeric string.
mod epoch_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Epoch {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S>(epoch: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*epoch)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Epoch::deserialize(deserializer)? {
            Epoch::Int(v) => Ok(v),
            Epoch::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            Epoch::Float(v) => Err(D::Error::custom(format!("invalid epoch: {v}"))),
            Epoch::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| D::Error::custom(format!("invalid epoch {s:?}: {e}"))),
        }
    }
}

/// Serde support for floats sent either as a number or a numeric string.
///
/// Unparseable strings become NaN rather than failing the whole record.
mod float_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Float {
        Num(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Float>::deserialize(deserializer)? {
            Some(Float::Num(v)) => v,
            Some(Float::Text(s)) => s.trim().parse().unwrap_or(f64::NAN),
            None => f64::NAN,
        })
    }
}
