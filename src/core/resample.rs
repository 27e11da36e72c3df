//! Piecewise-linear resampling of a sparse series onto arbitrary positions.
//!
//! Queries outside the sampled range are held flat at the nearest
//! boundary sample. Lookup is a binary search per query.

use crate::core::error::MergeError;

/// Linear interpolator over `(x, y)` samples with `x` increasing.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Slope of each segment `[i, i + 1]`
    slopes: Vec<f64>,
}

impl LinearInterpolator {
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, MergeError> {
        MergeError::check_len("interpolator", xs.len(), ys.len())?;

        let slopes = xs
            .windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| {
                let dx = x[1] - x[0];
                // Zero and NaN spans fall back to a unit span.
                let dx = if dx == 0.0 || dx.is_nan() { 1.0 } else { dx };
                (y[1] - y[0]) / dx
            })
            .collect();

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            slopes,
        })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Value at `x`, or `None` when there are no samples.
    pub fn sample(&self, x: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.value_at(x))
    }

    /// Evaluate at every axis position. `None` when there are no samples.
    pub fn resample(&self, axis: &[f64]) -> Option<Vec<f64>> {
        if self.is_empty() {
            return None;
        }
        Some(axis.iter().map(|&x| self.value_at(x)).collect())
    }

    fn value_at(&self, x: f64) -> f64 {
        let insert_at = self.xs.partition_point(|&v| v < x);

        let Some(i) = insert_at.checked_sub(1) else {
            return self.ys[0];
        };
        if i >= self.slopes.len() {
            return self.ys[self.ys.len() - 1];
        }

        self.ys[i] + self.slopes[i] * (x - self.xs[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_interpolation() {
        let interp = LinearInterpolator::new(&[0.0, 10.0], &[0.0, 100.0]).unwrap();
        assert_eq!(interp.sample(5.0), Some(50.0));
        assert_eq!(interp.sample(-3.0), Some(0.0));
        assert_eq!(interp.sample(15.0), Some(100.0));
        assert_eq!(interp.sample(10.0), Some(100.0));
        assert_eq!(interp.sample(0.0), Some(0.0));
    }

    #[test]
    fn test_single_sample_is_constant() {
        let interp = LinearInterpolator::new(&[5.0], &[42.0]).unwrap();
        let out = interp.resample(&[-10.0, 0.0, 5.0, 6.0, 1e9]).unwrap();
        assert!(out.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_empty_samples_yield_none() {
        let interp = LinearInterpolator::new(&[], &[]).unwrap();
        assert_eq!(interp.sample(1.0), None);
        assert_eq!(interp.resample(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = LinearInterpolator::new(&[0.0, 1.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            MergeError::LengthMismatch {
                series: "interpolator",
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_x_uses_unit_span() {
        // Slope over the zero-width segment is (20 - 10) / 1.
        let interp = LinearInterpolator::new(&[0.0, 0.0, 10.0], &[10.0, 20.0, 20.0]).unwrap();
        assert_eq!(interp.sample(0.0), Some(10.0));
        assert_eq!(interp.sample(5.0), Some(20.0));
    }

    #[test]
    fn test_multi_segment_brackets() {
        let interp =
            LinearInterpolator::new(&[0.0, 10.0, 20.0, 40.0], &[0.0, 10.0, 0.0, 10.0]).unwrap();
        let out = interp.resample(&[5.0, 15.0, 30.0, 40.0]).unwrap();
        assert_eq!(out, vec![5.0, 5.0, 5.0, 10.0]);
    }

    #[test]
    fn test_nan_sample_poisons_adjacent_segments_only() {
        let interp =
            LinearInterpolator::new(&[0.0, 10.0, 20.0, 30.0], &[0.0, f64::NAN, 20.0, 30.0])
                .unwrap();
        assert!(interp.sample(5.0).unwrap().is_nan());
        assert!(interp.sample(15.0).unwrap().is_nan());
        assert_eq!(interp.sample(25.0), Some(25.0));
    }

    #[test]
    fn test_large_axis() {
        let xs: Vec<f64> = (0..100_000).map(|i| i as f64 * 2.0).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * 3.0).collect();
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        let axis: Vec<f64> = (0..200_000).map(|i| i as f64).collect();
        let out = interp.resample(&axis).unwrap();
        assert_eq!(out.len(), axis.len());
        assert!((out[12_345] - 37_035.0).abs() < 1e-9);
    }
}
