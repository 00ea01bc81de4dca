//! Dictionary storage and vector quantization of word trajectories.
//!
//! Quantization runs once at startup: every word's ideal key path is
//! resampled and shortened, the short embeddings are clustered with a fixed
//! number of Lloyd's iterations, and the resulting centers become the items
//! of the vantage-point index. Words, centers, and membership are read-only
//! for the lifetime of the decoding phase.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::Result;
use crate::geometry::{rms_distance, MeanAccumulator, Point};
use crate::layout::KeyLayout;
use crate::resample::shorten;
use crate::vptree::{Metric, VantagePointTree};
use crate::{FULL_TRAJECTORY_LEN, SHORT_TRAJECTORY_LEN};

/// A short trajectory tagged with the cluster it represents.
///
/// The tag is only meaningful on cluster centers placed into the index;
/// query embeddings leave it zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortEmbedding {
    pub points: Vec<Point>,
    pub cluster: u32,
}

impl ShortEmbedding {
    /// Wrap a short trajectory as a query embedding (cluster tag unused).
    #[must_use]
    pub const fn query(points: Vec<Point>) -> Self {
        Self { points, cluster: 0 }
    }
}

/// Root-mean-square metric over short embeddings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortEmbeddingMetric;

impl Metric<ShortEmbedding> for ShortEmbeddingMetric {
    fn distance(&self, lhs: &ShortEmbedding, rhs: &ShortEmbedding) -> f64 {
        rms_distance(&lhs.points, &rhs.points)
    }
}

/// The vantage-point index built over a dictionary's cluster centers.
pub type ClusterIndex<'a> = VantagePointTree<'a, ShortEmbedding, ShortEmbeddingMetric>;

/// An ordered word list plus the cluster structure produced by
/// [`Dictionary::quantize`].
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    cluster_centers: Vec<ShortEmbedding>,
    cluster_words: Vec<Vec<u32>>,
}

impl Dictionary {
    /// Build a dictionary from an ordered word list.
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            cluster_centers: Vec::new(),
            cluster_words: Vec::new(),
        }
    }

    /// The word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Look up a word by index.
    #[must_use]
    pub fn word(&self, index: u32) -> &str {
        &self.words[index as usize]
    }

    /// Cluster centers produced by the last quantization run, in cluster-id
    /// order.
    #[must_use]
    pub fn cluster_centers(&self) -> &[ShortEmbedding] {
        &self.cluster_centers
    }

    /// Word indices assigned to a cluster.
    #[must_use]
    pub fn cluster_members(&self, cluster: u32) -> &[u32] {
        &self.cluster_words[cluster as usize]
    }

    /// Cluster the dictionary's short trajectory embeddings.
    ///
    /// Seeds centers from a random permutation of the word embeddings
    /// (truncated to `cluster_count`), then alternates assignment and
    /// center updates for `config.iterations` rounds. Assignment keeps the
    /// first minimum under strict-less-than replacement, so ties favor the
    /// lower cluster index; clusters left without members keep their
    /// previous center. Centers and membership are rebuilt wholesale; a
    /// dictionary with no words ends up with no clusters.
    ///
    /// The pseudo-random source is seeded from `config.seed`, so repeated
    /// runs reproduce the same clustering.
    ///
    /// Returns the mean best distance after each assignment pass, a
    /// convergence diagnostic that is reported but never used for stopping.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or a word has no keys in the
    /// layout.
    pub fn quantize(&mut self, layout: &KeyLayout, config: &DecoderConfig) -> Result<Vec<f64>> {
        config.validate()?;

        self.cluster_centers.clear();
        self.cluster_words.clear();

        if self.words.is_empty() {
            return Ok(Vec::new());
        }

        let mut short_embeddings = Vec::with_capacity(self.words.len());
        for word in &self.words {
            let trajectory = layout.word_trajectory(word, FULL_TRAJECTORY_LEN)?;
            short_embeddings.push(shorten(&trajectory, SHORT_TRAJECTORY_LEN));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut centers = short_embeddings.clone();
        centers.shuffle(&mut rng);
        centers.truncate(config.cluster_count);

        let mut mean_distances = Vec::with_capacity(config.iterations);
        for iteration in 0..config.iterations {
            let mean = self.assign_words(&centers, &short_embeddings);
            update_centers(&mut centers, &self.cluster_words, &short_embeddings);

            debug!(iteration, mean_best_distance = mean, "quantization pass");
            mean_distances.push(mean);
        }

        self.cluster_centers = centers
            .into_iter()
            .enumerate()
            .map(|(cluster, points)| ShortEmbedding {
                points,
                cluster: cluster as u32,
            })
            .collect();

        Ok(mean_distances)
    }

    /// Build the vantage-point index over the current cluster centers.
    #[must_use]
    pub fn build_index(&self, seed: u64) -> ClusterIndex<'_> {
        VantagePointTree::build(&self.cluster_centers, ShortEmbeddingMetric, seed)
    }

    /// Nearest cluster center to a short trajectory, with its distance.
    /// `None` until a quantization run has produced centers.
    #[must_use]
    pub fn nearest_cluster(&self, short: &[Point]) -> Option<(usize, f64)> {
        nearest(
            self.cluster_centers.iter().map(|c| c.points.as_slice()),
            short,
        )
    }

    /// Assign every word to its nearest center, rebuilding the membership
    /// table. Returns the mean best distance over all words.
    fn assign_words(&mut self, centers: &[Vec<Point>], short_embeddings: &[Vec<Point>]) -> f64 {
        self.cluster_words = vec![Vec::new(); centers.len()];

        let mut mean = MeanAccumulator::new();
        for (word_idx, short) in short_embeddings.iter().enumerate() {
            let (cluster, distance) = nearest(centers.iter().map(Vec::as_slice), short)
                .unwrap_or((0, 0.0));
            self.cluster_words[cluster].push(word_idx as u32);
            mean.add(distance);
        }
        mean.mean()
    }
}

/// Index and distance of the nearest center under strict-less-than
/// replacement (ties keep the lower index).
fn nearest<'a>(
    centers: impl Iterator<Item = &'a [Point]>,
    short: &[Point],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (cluster, center) in centers.enumerate() {
        let distance = rms_distance(short, center);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((cluster, distance)),
        }
    }
    best
}

/// Recompute each center as the coordinate-wise streaming mean of its
/// members' short embeddings. Empty clusters keep their previous center.
fn update_centers(
    centers: &mut [Vec<Point>],
    cluster_words: &[Vec<u32>],
    short_embeddings: &[Vec<Point>],
) {
    for (center, members) in centers.iter_mut().zip(cluster_words.iter()) {
        if members.is_empty() {
            continue;
        }

        let mut x = vec![MeanAccumulator::new(); SHORT_TRAJECTORY_LEN];
        let mut y = vec![MeanAccumulator::new(); SHORT_TRAJECTORY_LEN];

        for &word_idx in members {
            let short = &short_embeddings[word_idx as usize];
            for i in 0..SHORT_TRAJECTORY_LEN {
                x[i].add(short[i].x);
                y[i].add(short[i].y);
            }
        }

        for i in 0..SHORT_TRAJECTORY_LEN {
            center[i] = Point::new(x[i].mean(), y[i].mean());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_layout() -> KeyLayout {
        KeyLayout::parse("a:0:0 b:100:0 c:0:100 d:100:100").unwrap()
    }

    fn quantized(words: &[&str], config: &DecoderConfig) -> Dictionary {
        let mut dict = Dictionary::new(words.iter().map(|w| (*w).to_owned()).collect());
        dict.quantize(&test_layout(), config).unwrap();
        dict
    }

    #[test]
    fn test_quantize_empty_dictionary() {
        let mut dict = Dictionary::new(Vec::new());
        let diag = dict.quantize(&test_layout(), &DecoderConfig::default()).unwrap();
        assert!(diag.is_empty());
        assert!(dict.cluster_centers().is_empty());
        assert!(dict.build_index(0).is_empty());
    }

    #[test]
    fn test_membership_partitions_dictionary() {
        let config = DecoderConfig::default().with_cluster_count(3).with_iterations(4);
        let dict = quantized(&["ab", "ba", "cd", "dc", "abcd", "ad"], &config);

        let mut seen = vec![0usize; dict.words().len()];
        for cluster in 0..dict.cluster_centers().len() {
            for &word_idx in dict.cluster_members(cluster as u32) {
                seen[word_idx as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_fewer_words_than_clusters() {
        let config = DecoderConfig::default().with_cluster_count(10).with_iterations(1);
        let dict = quantized(&["ab", "cd"], &config);
        assert_eq!(dict.cluster_centers().len(), 2);
    }

    #[test]
    fn test_cluster_ids_are_contiguous() {
        let config = DecoderConfig::default().with_cluster_count(2).with_iterations(2);
        let dict = quantized(&["ab", "cd", "ad"], &config);
        for (i, center) in dict.cluster_centers().iter().enumerate() {
            assert_eq!(center.cluster as usize, i);
            assert_eq!(center.points.len(), SHORT_TRAJECTORY_LEN);
        }
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let config = DecoderConfig::default()
            .with_cluster_count(2)
            .with_iterations(1)
            .with_seed(123);

        let first = quantized(&["ab", "cd", "ad"], &config);
        let second = quantized(&["ab", "cd", "ad"], &config);

        assert_eq!(first.cluster_centers(), second.cluster_centers());
        for cluster in 0..first.cluster_centers().len() {
            assert_eq!(
                first.cluster_members(cluster as u32),
                second.cluster_members(cluster as u32)
            );
        }
    }

    #[test]
    fn test_mean_distance_non_increasing() {
        let words = ["ab", "ba", "cd", "dc", "ac", "ca", "bd", "db", "abcd", "dcba"];
        let config = DecoderConfig::default()
            .with_cluster_count(4)
            .with_iterations(6)
            .with_seed(9);
        let mut dict = Dictionary::new(words.iter().map(|w| (*w).to_owned()).collect());
        let diag = dict.quantize(&test_layout(), &config).unwrap();

        for pair in diag.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-6, "diverged: {pair:?}");
        }
    }

    #[test]
    fn test_nearest_cluster_tie_keeps_lower_index() {
        let config = DecoderConfig::default().with_cluster_count(2).with_iterations(1);
        let dict = quantized(&["ab", "ab", "ab"], &config);

        // Identical words collapse to identical centers; the tie must
        // resolve to cluster 0.
        let probe = dict.cluster_centers()[0].points.clone();
        let (cluster, distance) = dict.nearest_cluster(&probe).unwrap();
        assert_eq!(cluster, 0);
        assert!(distance.abs() < 1e-12);
    }

    #[test]
    fn test_unknown_word_fails() {
        let mut dict = Dictionary::new(vec!["zz".to_owned()]);
        let result = dict.quantize(&test_layout(), &DecoderConfig::default());
        assert!(result.is_err());
    }
}
