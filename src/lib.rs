//! Swipe Gesture Decoder
//!
//! Predicts the intended word behind a swipe gesture on a touch keyboard:
//! a finger path crossing several keys is matched against a dictionary to
//! find the most plausible target word.
//!
//! # Pipeline
//!
//! 1. **Normalize**: raw touch points and word key paths are resampled to a
//!    fixed-length trajectory, then block-averaged into a short summary.
//! 2. **Quantize**: the dictionary's short embeddings are clustered with a
//!    fixed number of Lloyd's iterations.
//! 3. **Index**: a vantage-point tree is built once over the cluster
//!    centers.
//! 4. **Decode**: each swipe queries the index with an adaptive search
//!    radius, and the words of the returned clusters are scored against the
//!    resampled swipe.
//!
//! Construction runs once; decoding reads the dictionary, layout, and index
//! without ever mutating them.
//!
//! # Quick Start
//!
//! ```
//! use swipe_decoder::{decode, DecoderConfig, Dictionary, KeyLayout, SwipeEvent};
//!
//! let layout = KeyLayout::parse("a:0:0 b:10:0\t")?;
//! let config = DecoderConfig::default().with_cluster_count(2).with_iterations(1);
//!
//! let mut dict = Dictionary::new(vec!["ab".to_owned(), "ba".to_owned()]);
//! dict.quantize(&layout, &config)?;
//! let index = dict.build_index(config.seed);
//!
//! let event = SwipeEvent::parse("_\t0:0 3:0 7:0 10:0\tab")?;
//! let candidates = decode(&event, &dict, &layout, &index, &config)?;
//! assert_eq!(candidates[0].word, "ab");
//! # Ok::<(), swipe_decoder::DecodeError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod resample;
pub mod vptree;

// Re-exports for convenient access
pub use config::DecoderConfig;
pub use decoder::{decode, score, Candidate, MAX_CANDIDATES};
pub use dictionary::{ClusterIndex, Dictionary, ShortEmbedding, ShortEmbeddingMetric};
pub use error::{DecodeError, Result};
pub use event::SwipeEvent;
pub use geometry::{rms_distance, MeanAccumulator, Point};
pub use layout::{KeyInfo, KeyLayout};
pub use resample::{resample, shorten};
pub use vptree::{Metric, VantagePointTree};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full resampled trajectory length, used for scoring.
pub const FULL_TRAJECTORY_LEN: usize = 50;

/// Short summarized trajectory length, used for clustering and indexing.
pub const SHORT_TRAJECTORY_LEN: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let layout = KeyLayout::parse("a:0:0 b:20:0 c:0:20 d:20:20\t").unwrap();
        let words = ["ab", "ba", "cd", "ad", "abcd"];
        let config = DecoderConfig::default()
            .with_cluster_count(3)
            .with_iterations(3)
            .with_seed(1);

        let mut dict = Dictionary::new(words.iter().map(|w| (*w).to_owned()).collect());
        dict.quantize(&layout, &config).unwrap();
        let index = dict.build_index(config.seed);

        // A swipe hugging the a->b key row.
        let event = SwipeEvent::parse("_\t0:0 5:0 10:0 15:0 20:0\tab").unwrap();
        let candidates = decode(&event, &dict, &layout, &index, &config).unwrap();

        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].word, "ab");
        assert!(candidates.len() <= MAX_CANDIDATES);

        // Ranked descending by score.
        for pair in candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_trajectory_lengths_are_consistent() {
        // The short length must divide the full length cleanly enough that
        // no shorten bucket is ever empty.
        assert!(FULL_TRAJECTORY_LEN >= SHORT_TRAJECTORY_LEN);
    }
}
