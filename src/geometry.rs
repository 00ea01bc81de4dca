//! Point type, trajectory metric, and streaming mean accumulation.
//!
//! A trajectory is an ordered `Vec<Point>`. Two trajectory lengths matter
//! crate-wide: the full resampled length used for scoring
//! ([`crate::FULL_TRAJECTORY_LEN`]) and the short summarized length used for
//! clustering and indexing ([`crate::SHORT_TRAJECTORY_LEN`]).

use serde::{Deserialize, Serialize};

/// A 2D touch or key coordinate. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point from coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Root-mean-square Euclidean distance between two equal-length trajectories.
///
/// Defined only when both trajectories have the same length; never negative,
/// and zero iff the trajectories are pointwise identical. An empty pair is
/// at distance zero.
#[must_use]
pub fn rms_distance(lhs: &[Point], rhs: &[Point]) -> f64 {
    debug_assert_eq!(lhs.len(), rhs.len(), "trajectory lengths must match");

    if lhs.is_empty() {
        return 0.0;
    }

    let sum_squared: f64 = lhs
        .iter()
        .zip(rhs.iter())
        .map(|(a, b)| a.squared_distance(b))
        .sum();

    (sum_squared.max(0.0) / lhs.len() as f64).sqrt()
}

/// Streaming arithmetic mean accumulator.
///
/// Uses the incremental update `mean += (x - mean) / n` to bound floating
/// error over long runs. An accumulator that has seen no samples reports a
/// mean of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    mean: f64,
    count: u64,
}

impl MeanAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mean: 0.0,
            count: 0,
        }
    }

    /// Fold one sample into the running mean.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// Current mean, or zero if no samples were added.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of samples folded in so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }
}
