//! Workout Track - merges delta-encoded workout sensor streams into one track.
//!
//! A workout arrives as a summary plus several raw strings, one per sensor:
//! position, altitude, heart rate and gait. Each sensor is sampled on its
//! own clock, at its own rate, as relative deltas. This library turns them
//! into a single time-ordered sequence of fully-populated track points.
//!
//! # Guarantees
//!
//! - **Pure**: no I/O, no shared state; one call per record
//! - **Tolerant**: malformed numbers degrade to NaN instead of failing
//! - **Ordered**: points come out on a strictly increasing time axis
//! - **Loud on structure**: misaligned columns are reported as errors
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Workout Track                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Decode    │──▶│ Accumulate  │──▶│ Master axis │       │
//! │  │ (raw → f64) │   │  (deltas)   │   │   (union)   │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │                                              │              │
//! │                                              ▼              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │ Track points│◀──│  Resample   │◀──│  Gap fill   │       │
//! │  │  (scaled)   │   │  (linear)   │   │ (sentinel)  │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use workout_track::{assemble_record, MergeOptions, RawRecord};
//!
//! let record: RawRecord = serde_json::from_str(r#"{
//!     "summary": { "trackid": "1600000000", "type": 1 },
//!     "detail": {
//!         "longitude_latitude": "5000000000,1000000000;100,100;100,100",
//!         "time": "0;5;5",
//!         "heart_rate": "0,60;10,60"
//!     }
//! }"#).unwrap();
//!
//! let track = assemble_record(&record, &MergeOptions::default()).unwrap();
//! assert_eq!(track.points.len(), 3);
//! assert_eq!(track.points[1].heart_rate, Some(90.0));
//! ```

pub mod config;
pub mod core;
pub mod record;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, OutputFormat};
pub use core::{
    assemble_record, process_batch, MergeError, MergeOptions, Track, TrackAssembler, TrackPoint,
};
pub use record::{RawRecord, WorkoutDetail, WorkoutSummary};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
