//! Demonstration of merging one workout record into a track.
//!
//! This example shows how to:
//! 1. Deserialize a raw record as the upstream API delivers it
//! 2. Run the merge pipeline with default options
//! 3. Inspect the resulting track points
//!
//! Run with: cargo run --example merge_demo

use workout_track::{assemble_record, MergeOptions, RawRecord};

const RECORD: &str = r#"{
    "summary": { "trackid": "1600000000", "dis": "42.0", "type": 1 },
    "detail": {
        "longitude_latitude": "5000000000,1000000000;120,80;115,85;110,90",
        "time": "0;4;4;4",
        "altitude": "15000;15020;15050;-2000000",
        "heart_rate": "0,92;6,8;6,5",
        "gait": "1,0,98,164;5,0,102,168;5,0,101,170"
    }
}"#;

fn main() {
    println!("Workout Track - Merge Demo");
    println!("==========================");
    println!();

    let record: RawRecord = match serde_json::from_str(RECORD) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Error parsing record: {e}");
            return;
        }
    };

    let track = match assemble_record(&record, &MergeOptions::default()) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Error merging record: {e}");
            return;
        }
    };

    println!(
        "Workout {} (type {}): {} points",
        track.summary.trackid,
        track.summary.workout_type,
        track.points.len()
    );
    println!();

    for point in &track.points {
        println!(
            "  +{:>4}s  {:.6}, {:.6}  alt {:>7}  hr {:>6}  cad {:>6}",
            point.offset_secs,
            point.latitude,
            point.longitude,
            fmt_opt(point.altitude),
            fmt_opt(point.heart_rate),
            fmt_opt(point.cadence),
        );
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string())
}
