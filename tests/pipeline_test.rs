//! Integration tests for the record → track pipeline

use serde_json::json;
use workout_track::core::{LinearInterpolator, SourceTimes};
use workout_track::{assemble_record, process_batch, MergeOptions, RawRecord};

fn record(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).expect("valid record")
}

fn sample_record() -> RawRecord {
    record(json!({
        "summary": { "trackid": "1600000000", "dis": "1234.5", "type": 1, "source": "watch" },
        "detail": {
            "longitude_latitude": "5000000000,1000000000;100,-100;100,-100",
            "time": "0;5;5",
            "altitude": "15000;-2000000;15100",
            "heart_rate": "0,60;10,60",
            "gait": "0,0,100,160;10,0,110,170"
        }
    }))
}

#[test]
fn test_end_to_end_scenario() {
    let track = assemble_record(&sample_record(), &MergeOptions::default()).unwrap();

    let offsets: Vec<f64> = track.points.iter().map(|p| p.offset_secs).collect();
    assert_eq!(offsets, vec![0.0, 5.0, 10.0]);

    let middle = &track.points[1];
    assert_eq!(middle.heart_rate, Some(90.0));
    assert_eq!(middle.cadence, Some(165.0));
    assert_eq!(middle.stride, Some(105.0));
    assert_eq!(middle.altitude, Some(150.0));
    assert!((middle.latitude - 50.000001).abs() < 1e-9);
    assert!((middle.longitude - 9.999999).abs() < 1e-9);

    let last = &track.points[2];
    assert_eq!(last.altitude, Some(151.0));
    assert_eq!(
        last.time.map(|t| t.timestamp()),
        Some(1_600_000_010)
    );
}

#[test]
fn test_summary_is_passed_through() {
    let track = assemble_record(&sample_record(), &MergeOptions::default()).unwrap();
    assert_eq!(track.summary.trackid, 1_600_000_000);
    assert_eq!(track.summary.workout_type, 1);
    assert_eq!(track.summary.source.as_deref(), Some("watch"));
}

#[test]
fn test_points_are_strictly_increasing() {
    let track = assemble_record(
        &record(json!({
            "summary": { "trackid": 0 },
            "detail": {
                "longitude_latitude": "1,1;1,1;1,1;1,1",
                "time": "0;3;0;4",
                "heart_rate": "1,70;2,1;2,1",
                "gait": "2,0,1,1;5,0,1,1"
            }
        })),
        &MergeOptions::default(),
    )
    .unwrap();

    let offsets: Vec<f64> = track.points.iter().map(|p| p.offset_secs).collect();
    assert_eq!(offsets, vec![0.0, 1.0, 2.0, 3.0, 5.0, 7.0]);
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_position_short_circuits() {
    let track = assemble_record(
        &record(json!({
            "summary": { "trackid": 1 },
            "detail": {
                "longitude_latitude": "",
                "heart_rate": "0,60;10,60",
                "gait": "0,0,100,160"
            }
        })),
        &MergeOptions::default(),
    )
    .unwrap();
    assert!(track.points.is_empty());
}

#[test]
fn test_interpolation_properties() {
    let interp = LinearInterpolator::new(&[0.0, 10.0], &[0.0, 100.0]).unwrap();
    assert_eq!(interp.resample(&[5.0, -3.0, 15.0]), Some(vec![50.0, 0.0, 100.0]));

    let single = LinearInterpolator::new(&[5.0], &[42.0]).unwrap();
    assert_eq!(single.resample(&[0.0, 5.0, 100.0]), Some(vec![42.0; 3]));
}

#[test]
fn test_axis_merge_with_itself() {
    let a = vec![4.0, 1.0, 4.0, 2.0];
    let times = SourceTimes {
        track: a.clone(),
        heart_rate: a.clone(),
        gait: a,
    };
    assert_eq!(times.merged(), vec![1.0, 2.0, 4.0]);
}

#[test]
fn test_batch_keeps_misaligned_records() {
    let misaligned = record(json!({
        "summary": { "trackid": 2 },
        "detail": { "longitude_latitude": "1,1;2,2", "time": "0" }
    }));
    let records = vec![sample_record(), misaligned, sample_record()];

    let results = process_batch(&records, &MergeOptions::default(), 2);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(results[1].as_ref().unwrap().points.len(), 1);
    assert_eq!(results[2].as_ref().unwrap().points.len(), 3);
}

#[test]
fn test_short_altitude_degrades_to_nan() {
    let track = assemble_record(
        &record(json!({
            "summary": { "trackid": 3 },
            "detail": {
                "longitude_latitude": "100,100;100,100;100,100",
                "time": "0;5;5",
                "altitude": "150;160"
            }
        })),
        &MergeOptions::default(),
    )
    .unwrap();

    assert_eq!(track.points.len(), 3);
    assert_eq!(track.points[0].altitude, Some(1.5));
    assert_eq!(track.points[1].altitude, Some(1.6));
    assert!(track.points[2].altitude.unwrap().is_nan());
}

#[test]
fn test_long_clock_degrades_to_nan() {
    let track = assemble_record(
        &record(json!({
            "summary": { "trackid": 4 },
            "detail": {
                "longitude_latitude": "100,100;100,100;100,100",
                "time": "0;5;5;5"
            }
        })),
        &MergeOptions::default(),
    )
    .unwrap();

    let offsets: Vec<f64> = track.points.iter().map(|p| p.offset_secs).collect();
    assert_eq!(offsets, vec![0.0, 5.0, 10.0, 15.0]);
    assert!((track.points[1].latitude - 2e-6).abs() < 1e-15);
    assert!(track.points[2].latitude.is_nan());
    assert!(track.points[3].latitude.is_nan());
}

#[test]
fn test_track_serializes_to_json() {
    let track = assemble_record(&sample_record(), &MergeOptions::default()).unwrap();
    let value = serde_json::to_value(&track).unwrap();

    assert_eq!(value["summary"]["trackid"], 1_600_000_000);
    assert_eq!(value["points"].as_array().unwrap().len(), 3);
    assert_eq!(value["points"][0]["time"], "2020-09-13T12:26:40Z");
}
