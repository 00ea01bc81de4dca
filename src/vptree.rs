//! Generic vantage-point tree: a metric-space index for
//! build-once/query-many near-item search.
//!
//! The tree is generic over an item type and a [`Metric`]. Nodes live in an
//! arena (`Vec<Node>`) and reference each other by index; items are
//! referenced by index into the caller's immutable slice, which the tree
//! borrows for its lifetime. Construction permutes a private index buffer
//! in place, so the items themselves are never moved or mutated.
//!
//! Construction uses an explicit worklist instead of recursion so stack
//! depth stays bounded regardless of item count and dataset skew.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Distance function over an abstract item type.
///
/// Implementations must be symmetric, non-negative, and return zero for
/// equal items (up to floating comparison).
pub trait Metric<T> {
    fn distance(&self, lhs: &T, rhs: &T) -> f64;
}

/// Nodes holding at most this many items become leaves.
const MAX_LEAF_SIZE: usize = 5;

/// Fraction of non-coincident items routed to the inner child.
const SPLIT_FRACTION: f64 = 0.5;

#[derive(Debug)]
struct Node {
    /// Median distance separating the inner and outer children. Zero for
    /// leaves.
    radius: f64,
    /// Offset of this node's item range in the permuted index buffer.
    start: usize,
    /// Leaf: number of bucket items. Internal: size of the coincident
    /// bucket (vantage point plus items at exactly zero distance from it).
    bucket_len: usize,
    inner: Option<usize>,
    outer: Option<usize>,
}

impl Node {
    const fn is_leaf(&self) -> bool {
        self.inner.is_none()
    }
}

/// Where a finished node's arena index gets written back to.
enum Slot {
    Root,
    Inner(usize),
    Outer(usize),
}

struct BuildJob {
    slot: Slot,
    start: usize,
    count: usize,
}

/// A vantage-point tree over `items`, answering "up to `limit` items within
/// `max_distance` of a query" via triangle-inequality pruning.
///
/// # Example
///
/// ```
/// use swipe_decoder::vptree::{Metric, VantagePointTree};
///
/// struct Abs;
/// impl Metric<f64> for Abs {
///     fn distance(&self, lhs: &f64, rhs: &f64) -> f64 {
///         (lhs - rhs).abs()
///     }
/// }
///
/// let items = vec![1.0, 5.0, 9.0, 2.0];
/// let tree = VantagePointTree::build(&items, Abs, 0);
/// let mut found = tree.find_nearby(&1.5, 1.0, 10);
/// found.sort_unstable();
/// assert_eq!(found, vec![0, 3]);
/// ```
pub struct VantagePointTree<'a, T, M> {
    items: &'a [T],
    metric: M,
    /// Permutation of `0..items.len()`; each node owns a contiguous range.
    ordered: Vec<usize>,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl<'a, T, M: Metric<T>> VantagePointTree<'a, T, M> {
    /// Build a tree over the given items.
    ///
    /// `seed` drives the vantage-point selection; fixed seeds make the tree
    /// shape reproducible. An empty slice yields a tree with no root whose
    /// queries all return empty.
    pub fn build(items: &'a [T], metric: M, seed: u64) -> Self {
        let mut tree = Self {
            items,
            metric,
            ordered: (0..items.len()).collect(),
            nodes: Vec::new(),
            root: None,
        };

        if items.is_empty() {
            return tree;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut worklist = vec![BuildJob {
            slot: Slot::Root,
            start: 0,
            count: items.len(),
        }];

        while let Some(job) = worklist.pop() {
            let node_idx = tree.build_node(job.start, job.count, &mut rng, &mut worklist);
            match job.slot {
                Slot::Root => tree.root = Some(node_idx),
                Slot::Inner(parent) => tree.nodes[parent].inner = Some(node_idx),
                Slot::Outer(parent) => tree.nodes[parent].outer = Some(node_idx),
            }
        }

        tree
    }

    /// Find up to `limit` items within `max_distance` of `query`.
    ///
    /// Returns indices into the item slice the tree was built over; order
    /// among returned items is unspecified.
    #[must_use]
    pub fn find_nearby(&self, query: &T, max_distance: f64, limit: usize) -> Vec<usize> {
        let mut results = Vec::new();
        if let Some(root) = self.root {
            self.collect(root, query, max_distance, limit, &mut results);
        }
        results
    }

    /// Number of indexed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree indexes no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn build_node(
        &mut self,
        start: usize,
        count: usize,
        rng: &mut StdRng,
        worklist: &mut Vec<BuildJob>,
    ) -> usize {
        let node_idx = self.nodes.len();

        if count <= MAX_LEAF_SIZE {
            self.nodes.push(Node {
                radius: 0.0,
                start,
                bucket_len: count,
                inner: None,
                outer: None,
            });
            return node_idx;
        }

        let vantage = start + rng.gen_range(0..count);
        self.ordered.swap(start, vantage);

        // Scratch pairs of (item index, distance to the vantage point).
        let range = &self.ordered[start..start + count];
        let mut scratch: Vec<(usize, f64)> = Vec::with_capacity(count);
        scratch.push((range[0], 0.0));
        for &item in &range[1..] {
            let d = self
                .metric
                .distance(&self.items[range[0]], &self.items[item]);
            scratch.push((item, d));
        }

        // Coincident items (distance exactly zero) move directly behind the
        // vantage point so they can be emitted as one bucket during queries.
        let mut front = 1;
        let mut back = count - 1;
        while front <= back {
            if scratch[back].1 <= 0.0 {
                scratch.swap(front, back);
                front += 1;
            } else {
                back -= 1;
            }
        }
        let coincident_len = front;

        let remaining = count - coincident_len;
        let mut outer_start = coincident_len + (SPLIT_FRACTION * remaining as f64) as usize;
        let mut radius = 0.0;

        if remaining > 0 {
            let split = outer_start - coincident_len;
            scratch[coincident_len..]
                .select_nth_unstable_by(split, |a, b| a.1.total_cmp(&b.1));
            radius = scratch[outer_start].1;
            outer_start += 1;

            // Exact boundary: everything at the radius belongs to the inner
            // side, so sweep equal-distance stragglers across.
            let mut end = count - 1;
            while outer_start <= end {
                if scratch[end].1 <= radius {
                    scratch.swap(outer_start, end);
                    outer_start += 1;
                } else {
                    end -= 1;
                }
            }
        }

        for (slot, (item, _)) in self.ordered[start..start + count]
            .iter_mut()
            .zip(scratch.iter())
        {
            *slot = *item;
        }

        self.nodes.push(Node {
            radius,
            start,
            bucket_len: coincident_len,
            inner: None,
            outer: None,
        });

        worklist.push(BuildJob {
            slot: Slot::Inner(node_idx),
            start: start + coincident_len,
            count: outer_start - coincident_len,
        });
        worklist.push(BuildJob {
            slot: Slot::Outer(node_idx),
            start: start + outer_start,
            count: count - outer_start,
        });

        node_idx
    }

    fn collect(
        &self,
        node_idx: usize,
        query: &T,
        max_distance: f64,
        limit: usize,
        results: &mut Vec<usize>,
    ) {
        if results.len() == limit {
            return;
        }

        let node = &self.nodes[node_idx];

        if node.is_leaf() {
            for &item in &self.ordered[node.start..node.start + node.bucket_len] {
                if self.metric.distance(query, &self.items[item]) <= max_distance {
                    results.push(item);
                    if results.len() == limit {
                        return;
                    }
                }
            }
            return;
        }

        let vantage = self.ordered[node.start];
        let distance = self.metric.distance(query, &self.items[vantage]);

        if distance <= max_distance {
            // Every coincident item is at the vantage point's distance.
            for &item in &self.ordered[node.start..node.start + node.bucket_len] {
                results.push(item);
                if results.len() == limit {
                    return;
                }
            }
        }

        let (Some(inner), Some(outer)) = (node.inner, node.outer) else {
            return;
        };

        if node.radius >= distance + max_distance {
            // The query ball lies entirely inside the radius.
            self.collect(inner, query, max_distance, limit, results);
        } else if distance > node.radius + max_distance {
            // The query ball lies entirely outside the radius.
            self.collect(outer, query, max_distance, limit, results);
        } else {
            self.collect(inner, query, max_distance, limit, results);
            self.collect(outer, query, max_distance, limit, results);
        }
    }
}
