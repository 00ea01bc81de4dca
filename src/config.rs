//! Configuration for dictionary quantization and gesture decoding.
//!
//! This module provides the [`DecoderConfig`] struct which centralizes all
//! tunable parameters of the pipeline, along with presets for common
//! dictionary sizes.
//!
//! # Example
//!
//! ```
//! use swipe_decoder::DecoderConfig;
//!
//! // Use default configuration
//! let config = DecoderConfig::default();
//!
//! // Tune individual knobs with the builder methods
//! let config = DecoderConfig::default().with_cluster_count(500).with_seed(7);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};

/// Configuration for dictionary quantization and gesture decoding.
///
/// The defaults suit a full-size dictionary: 1000 clusters, 5 Lloyd's
/// iterations, and at most 20 clusters consulted per swipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Number of clusters to quantize the dictionary into.
    pub cluster_count: usize,

    /// Number of Lloyd's iterations to run during quantization.
    pub iterations: usize,

    /// Maximum number of clusters consulted per decoded swipe.
    pub cluster_limit: usize,

    /// Starting distance limit for the adaptive-radius cluster search.
    pub initial_distance_limit: f64,

    /// Retry budget for the adaptive-radius search before giving up
    /// with [`DecodeError::SearchDidNotConverge`].
    pub max_search_retries: usize,

    /// Seed for the pseudo-random source used by quantization seeding and
    /// vantage-point selection. Fixed seeds make runs reproducible.
    pub seed: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            cluster_count: 1000,
            iterations: 5,
            cluster_limit: 20,
            initial_distance_limit: 10_000.0,
            max_search_retries: 64,
            seed: 0,
        }
    }
}

impl DecoderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(DecodeError::invalid_config(
                "cluster_count must be at least 1",
            ));
        }
        if self.iterations == 0 {
            return Err(DecodeError::invalid_config(
                "iterations must be at least 1",
            ));
        }
        if self.cluster_limit == 0 {
            return Err(DecodeError::invalid_config(
                "cluster_limit must be at least 1",
            ));
        }
        if self.initial_distance_limit <= 0.0 {
            return Err(DecodeError::invalid_config(
                "initial_distance_limit must be positive",
            ));
        }
        if self.max_search_retries == 0 {
            return Err(DecodeError::invalid_config(
                "max_search_retries must be at least 1",
            ));
        }
        Ok(())
    }

    /// Preset for small dictionaries (a few thousand words).
    ///
    /// Fewer clusters keep the index shallow without hurting recall.
    #[must_use]
    pub fn small_dictionary() -> Self {
        Self {
            cluster_count: 100,
            cluster_limit: 10,
            ..Self::default()
        }
    }

    /// Preset for large dictionaries (hundreds of thousands of words).
    #[must_use]
    pub fn large_dictionary() -> Self {
        Self {
            cluster_count: 4000,
            iterations: 8,
            cluster_limit: 30,
            ..Self::default()
        }
    }

    /// Set the cluster count.
    #[must_use]
    pub const fn with_cluster_count(mut self, count: usize) -> Self {
        self.cluster_count = count;
        self
    }

    /// Set the number of quantization iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the per-query cluster limit.
    #[must_use]
    pub const fn with_cluster_limit(mut self, limit: usize) -> Self {
        self.cluster_limit = limit;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cluster_count, 1000);
        assert_eq!(config.cluster_limit, 20);
        assert_eq!(config.iterations, 5);
    }

    #[test]
    fn test_presets() {
        assert!(DecoderConfig::small_dictionary().validate().is_ok());
        assert!(DecoderConfig::large_dictionary().validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = DecoderConfig::default();

        config.cluster_count = 0;
        assert!(config.validate().is_err());

        config.cluster_count = 1000;
        config.cluster_limit = 0;
        assert!(config.validate().is_err());

        config.cluster_limit = 20;
        config.initial_distance_limit = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DecoderConfig::default()
            .with_cluster_count(250)
            .with_iterations(3)
            .with_seed(42);
        assert_eq!(config.cluster_count, 250);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.seed, 42);
    }
}
