//! Gesture decoding: turn a raw swipe into a ranked list of candidate words.
//!
//! A swipe is resampled and shortened into a query embedding, nearby
//! clusters are fetched from the vantage-point index with an adaptive
//! search radius, and every word of those clusters is scored against the
//! resampled swipe. Decoding only reads the dictionary, layout, and index.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::DecoderConfig;
use crate::dictionary::{ClusterIndex, Dictionary, ShortEmbedding};
use crate::error::{DecodeError, Result};
use crate::event::SwipeEvent;
use crate::geometry::Point;
use crate::layout::KeyLayout;
use crate::resample::{resample, shorten};
use crate::{FULL_TRAJECTORY_LEN, SHORT_TRAJECTORY_LEN};

/// Number of ranked candidates returned per swipe.
pub const MAX_CANDIDATES: usize = 10;

/// A scored dictionary word. Scores are never positive: zero means a
/// perfect pointwise match, more negative means worse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: f64,
    pub word: String,
}

/// Score a candidate trajectory against the observed swipe trajectory.
///
/// The score is the negated sum of per-point squared Euclidean distances
/// between the two equal-length trajectories (no square root).
#[must_use]
pub fn score(candidate: &[Point], observed: &[Point]) -> f64 {
    debug_assert_eq!(candidate.len(), observed.len());

    let total: f64 = candidate
        .iter()
        .zip(observed.iter())
        .map(|(a, b)| a.squared_distance(b))
        .sum();
    -total
}

/// Decode a swipe event into at most [`MAX_CANDIDATES`] ranked candidates.
///
/// The top entry is the single best prediction. A dictionary without
/// clusters yields an empty list rather than an error.
///
/// # Errors
///
/// Fails when the swipe has no points, when a candidate word has no keys in
/// the layout, or when the adaptive-radius cluster search exhausts its
/// retry budget ([`DecodeError::SearchDidNotConverge`]).
pub fn decode(
    event: &SwipeEvent,
    dict: &Dictionary,
    layout: &KeyLayout,
    index: &ClusterIndex<'_>,
    config: &DecoderConfig,
) -> Result<Vec<Candidate>> {
    let observed = resample(&event.points, FULL_TRAJECTORY_LEN)?;
    let query = ShortEmbedding::query(shorten(&observed, SHORT_TRAJECTORY_LEN));

    if index.is_empty() {
        return Ok(Vec::new());
    }

    let clusters = find_clusters(index, &query, config)?;

    let mut candidates = Vec::new();
    for cluster in clusters {
        for &word_idx in dict.cluster_members(cluster as u32) {
            let word = dict.word(word_idx);
            let trajectory = layout.word_trajectory(word, FULL_TRAJECTORY_LEN)?;
            candidates.push(Candidate {
                score: score(&trajectory, &observed),
                word: word.to_owned(),
            });
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(MAX_CANDIDATES);

    Ok(candidates)
}

/// Adaptive-radius cluster search.
///
/// Starts from the configured distance limit and corrects until the result
/// count is strictly between zero and the cluster limit: an empty result
/// doubles the limit, a saturated result (the index cannot tell whether
/// more clusters would qualify) shrinks it by 0.9. The corrective moves can
/// oscillate, so every retry counts against `config.max_search_retries`.
fn find_clusters(
    index: &ClusterIndex<'_>,
    query: &ShortEmbedding,
    config: &DecoderConfig,
) -> Result<Vec<usize>> {
    let mut distance_limit = config.initial_distance_limit;
    let mut found = index.find_nearby(query, distance_limit, config.cluster_limit);

    let mut retries = 0;
    while found.is_empty() || found.len() == config.cluster_limit {
        if retries == config.max_search_retries {
            return Err(DecodeError::search_did_not_converge(retries));
        }
        retries += 1;

        if found.is_empty() {
            distance_limit *= 2.0;
        } else {
            distance_limit *= 0.9;
        }

        trace!(retries, distance_limit, "adjusting cluster search radius");
        found = index.find_nearby(query, distance_limit, config.cluster_limit);
    }

    Ok(found)
}
