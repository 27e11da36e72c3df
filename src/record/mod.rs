//! Raw workout records as delivered by the upstream data source.
//!
//! These types are immutable inputs: a summary describing the workout
//! and a detail payload of delimited, delta-encoded sensor strings.

pub mod types;

// Re-export commonly used types
pub use types::{RawRecord, WorkoutDetail, WorkoutSummary};
