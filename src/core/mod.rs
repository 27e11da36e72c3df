//! Core merge pipeline.
//!
//! This module contains:
//! - Decoding of delimited raw strings into typed series
//! - Delta accumulation and sentinel gap filling
//! - Piecewise-linear resampling
//! - Master time axis construction
//! - Track point assembly, one record or a batch at a time

pub mod accumulate;
pub mod assemble;
pub mod axis;
pub mod batch;
pub mod decode;
pub mod error;
pub mod gapfill;
pub mod resample;
pub mod series;

// Re-export commonly used types
pub use accumulate::accumulate;
pub use assemble::{assemble_record, MergeOptions, Track, TrackAssembler, TrackPoint};
pub use axis::{merge_axes, GapCompaction, MasterAxisBuilder, SourceTimes};
pub use batch::{default_workers, process_batch};
pub use decode::{decode_record, FieldSpec, RawSeriesDecoder};
pub use error::MergeError;
pub use gapfill::{fill_gaps, Sentinel, SentinelGapFiller, DEFAULT_SENTINEL};
pub use resample::LinearInterpolator;
pub use series::{DecodedTrack, GaitSeries, HeartRateSeries, PositionSeries};
