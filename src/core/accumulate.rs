//! Running sums over delta-encoded columns.

/// Convert relative deltas into absolute cumulative values.
///
/// No validation is done: negative deltas produce a non-monotonic result
/// and a NaN delta poisons every value after it.
pub fn accumulate(deltas: &[f64]) -> Vec<f64> {
    deltas
        .iter()
        .scan(0.0, |sum, delta| {
            *sum += delta;
            Some(*sum)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_basic() {
        assert_eq!(accumulate(&[0.0, 5.0, 5.0]), vec![0.0, 5.0, 10.0]);
        assert!(accumulate(&[]).is_empty());
    }

    #[test]
    fn test_accumulate_accepts_negative_deltas() {
        assert_eq!(accumulate(&[10.0, -4.0, 1.0]), vec![10.0, 6.0, 7.0]);
    }

    #[test]
    fn test_accumulate_propagates_nan() {
        let out = accumulate(&[1.0, f64::NAN, 2.0]);
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
    }
}
