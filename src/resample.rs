//! Trajectory normalization: uniform resampling and block-average shortening.
//!
//! [`resample`] turns an arbitrary polyline (raw touch points, or the key
//! centers a word visits) into a fixed-length trajectory; [`shorten`]
//! compresses a trajectory into a short fixed-length summary for clustering
//! and indexing.

use crate::error::{DecodeError, Result};
use crate::geometry::{MeanAccumulator, Point};

/// Resample a polyline to exactly `target_len` points by walking its
/// cumulative segment weight in equal steps.
///
/// Segment weight is the *squared* Euclidean distance, not true arc length.
/// Scoring and clustering both depend on the exact spacing this produces, so
/// the weighting is kept as-is even though it over-weights long segments.
///
/// A single-point input yields that point repeated `target_len` times.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyTrajectory`] for an empty input.
pub fn resample(source: &[Point], target_len: usize) -> Result<Vec<Point>> {
    debug_assert!(target_len >= 1, "target_len must be at least 1");

    if source.is_empty() {
        return Err(DecodeError::empty_trajectory("resample"));
    }
    if source.len() == 1 {
        return Ok(vec![source[0]; target_len]);
    }

    let weights: Vec<f64> = source
        .windows(2)
        .map(|pair| pair[0].squared_distance(&pair[1]))
        .collect();

    let total_weight: f64 = weights.iter().sum();
    let step = total_weight / target_len as f64;

    let mut resampled = Vec::with_capacity(target_len);

    let mut segment = 0;
    let mut collected = 0.0;
    let mut segment_end = weights[segment];

    for _ in 0..target_len {
        collected += step;

        while segment + 1 < weights.len() && collected > segment_end {
            segment += 1;
            segment_end += weights[segment];
        }

        let passed = collected - segment_end + weights[segment];
        let fraction = passed / (weights[segment] + 1e-10);

        let start = source[segment];
        let end = source[segment + 1];
        resampled.push(Point::new(
            start.x * (1.0 - fraction) + end.x * fraction,
            start.y * (1.0 - fraction) + end.y * fraction,
        ));
    }

    Ok(resampled)
}

/// Compress a trajectory into `short_len` points by block-averaging.
///
/// Point indices are partitioned into `short_len` contiguous buckets via the
/// integer-division boundaries `i*n/short_len .. (i+1)*n/short_len`; each
/// output point is the streaming mean of its bucket. A bucket can only be
/// empty when the input is shorter than `short_len`, in which case the mean
/// accumulator's zero default stands in.
#[must_use]
pub fn shorten(trajectory: &[Point], short_len: usize) -> Vec<Point> {
    let n = trajectory.len();
    let mut shortened = Vec::with_capacity(short_len);

    for i in 0..short_len {
        let start = i * n / short_len;
        let end = (i + 1) * n / short_len;

        let mut x = MeanAccumulator::new();
        let mut y = MeanAccumulator::new();
        for point in &trajectory[start..end] {
            x.add(point.x);
            y.add(point.y);
        }

        shortened.push(Point::new(x.mean(), y.mean()));
    }

    shortened
}
