//! Balanced 3D k-d tree over projected points.
//!
//! Nodes live in a flat arena and refer to their children by index, so a tree
//! degenerated by sorted insertions can be traversed and dropped without deep
//! recursion. All traversals are iterative; only [`SpatialTree::rebuild`]
//! recurses, and it does so to a depth of `log2(n)`.
//!
//! ## Ordering
//!
//! Every stored point carries an insertion sequence number that survives
//! rebuilds. Query results are ordered by `(squared distance, sequence)`, so
//! equal-distance ties always come back in insertion order, whatever the
//! current shape of the tree.
//!
//! ## Split rule
//!
//! A node splits on axis `depth % 3`. Insertion sends a point left when its
//! coordinate on the split axis is strictly smaller than the node's, right
//! otherwise. A rebuild selects the median by `(axis value, sequence)`, so
//! equal axis values may end up on either side of a node; queries account for
//! that.

use crate::config::DuplicatePolicy;
use revgeo_types::point::CartesianPoint;
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const DIMENSIONS: usize = CartesianPoint::DIMENSIONS;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<V> {
    point: CartesianPoint,
    value: V,
    seq: u64,
    axis: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Result of [`SpatialTree::insert_with_policy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<V> {
    /// The point was added as a new leaf.
    Inserted,
    /// A coincident point exists; the rejected value is handed back.
    Skipped(V),
    /// A coincident point existed; its previous value is handed back.
    Replaced(V),
    /// A coincident point exists and the policy forbids duplicates.
    Rejected(V),
}

/// One query hit: the stored point, its payload and the squared Euclidean
/// distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a, V> {
    pub point: CartesianPoint,
    pub value: &'a V,
    pub distance_squared: f64,
}

/// Max-heap entry; the worst retained candidate sits on top.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance_squared: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_squared
            .total_cmp(&other.distance_squared)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A k-d tree (k = 3) of Cartesian points with an opaque payload per point.
///
/// Coordinates must be finite; the projection layer guarantees that for every
/// point coming through the geocoder.
///
/// # Examples
///
/// ```
/// use revgeo::compute::spatial::SpatialTree;
/// use revgeo::CartesianPoint;
///
/// let mut tree = SpatialTree::new();
/// tree.insert(CartesianPoint::new(0.0, 0.0, 0.0), "origin");
/// tree.insert(CartesianPoint::new(1.0, 0.0, 0.0), "x");
/// tree.insert(CartesianPoint::new(0.0, 2.0, 0.0), "y");
/// tree.rebuild();
///
/// let hits = tree.nearest_neighbours(&CartesianPoint::new(0.9, 0.0, 0.0), 2);
/// assert_eq!(*hits[0].value, "x");
/// assert_eq!(*hits[1].value, "origin");
///
/// let within = tree.radial_search(&CartesianPoint::new(0.0, 0.0, 0.0), 1.0, 10);
/// assert_eq!(within.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialTree<V> {
    nodes: Vec<Node<V>>,
    root: Option<NodeId>,
    next_seq: u64,
}

impl<V> SpatialTree<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            next_seq: 0,
        }
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Insert a point, keeping any coincident points already stored.
    pub fn insert(&mut self, point: CartesianPoint, value: V) {
        self.insert_leaf(point, value);
    }

    /// Insert a point, resolving coincident points according to `policy`.
    ///
    /// Only [`InsertOutcome::Inserted`] changes the number of stored points.
    pub fn insert_with_policy(
        &mut self,
        point: CartesianPoint,
        value: V,
        policy: DuplicatePolicy,
    ) -> InsertOutcome<V> {
        if policy != DuplicatePolicy::Keep
            && let Some(existing) = self.find_coincident_id(&point)
        {
            return match policy {
                DuplicatePolicy::Skip => InsertOutcome::Skipped(value),
                DuplicatePolicy::Reject => InsertOutcome::Rejected(value),
                DuplicatePolicy::Replace => {
                    let old = std::mem::replace(&mut self.nodes[existing].value, value);
                    InsertOutcome::Replaced(old)
                }
                DuplicatePolicy::Keep => unreachable!("keep policy never looks up duplicates"),
            };
        }

        self.insert_leaf(point, value);
        InsertOutcome::Inserted
    }

    fn insert_leaf(&mut self, point: CartesianPoint, value: V) {
        debug_assert!(point.is_finite(), "k-d tree points must be finite");

        let id = self.nodes.len();
        let seq = self.next_seq;
        self.next_seq += 1;

        let Some(mut current) = self.root else {
            self.nodes.push(Node {
                point,
                value,
                seq,
                axis: 0,
                left: None,
                right: None,
            });
            self.root = Some(id);
            return;
        };

        loop {
            let node = &self.nodes[current];
            let axis = node.axis;
            let go_left = point.coord(axis) < node.point.coord(axis);
            let child = if go_left { node.left } else { node.right };

            match child {
                Some(next) => current = next,
                None => {
                    self.nodes.push(Node {
                        point,
                        value,
                        seq,
                        axis: (axis + 1) % DIMENSIONS,
                        left: None,
                        right: None,
                    });
                    let parent = &mut self.nodes[current];
                    if go_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    return;
                }
            }
        }
    }

    /// The earliest inserted payload stored exactly at `point`, if any.
    pub fn find_coincident(&self, point: &CartesianPoint) -> Option<&V> {
        self.find_coincident_id(point).map(|id| &self.nodes[id].value)
    }

    fn find_coincident_id(&self, point: &CartesianPoint) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        let mut stack: SmallVec<[NodeId; 64]> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.point == *point && best.is_none_or(|b| node.seq < self.nodes[b].seq) {
                best = Some(id);
            }

            // Equal axis values can sit on either side after a rebuild.
            let (probe, split) = (point.coord(node.axis), node.point.coord(node.axis));
            if probe <= split
                && let Some(left) = node.left
            {
                stack.push(left);
            }
            if probe >= split
                && let Some(right) = node.right
            {
                stack.push(right);
            }
        }

        best
    }

    /// Rebuild the whole tree by recursive median selection.
    ///
    /// The result has height `ceil(log2(n + 1))` and depends only on the stored
    /// points and their insertion order.
    pub fn rebuild(&mut self) {
        if self.nodes.is_empty() {
            return;
        }

        let mut entries: Vec<Node<V>> = std::mem::take(&mut self.nodes);
        let mut links = vec![(0usize, None, None); entries.len()];
        self.root = arrange(&mut entries, 0, 0, &mut links);

        self.nodes = entries
            .into_iter()
            .zip(links)
            .map(|(node, (axis, left, right))| Node {
                axis,
                left,
                right,
                ..node
            })
            .collect();

        log::debug!(
            "rebuilt k-d tree: {} points, height {}",
            self.nodes.len(),
            self.height()
        );
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }

        height
    }

    /// All stored points and payloads, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&CartesianPoint, &V)> + '_ {
        self.nodes.iter().map(|node| (&node.point, &node.value))
    }

    /// Up to `max_count` stored points closest to `query`, ascending by
    /// squared distance.
    pub fn nearest_neighbours(&self, query: &CartesianPoint, max_count: usize) -> Vec<SearchHit<'_, V>> {
        self.search(query, f64::INFINITY, max_count)
    }

    /// Up to `max_count` stored points whose squared distance to `query` is at
    /// most `max_squared_radius`, ascending by squared distance.
    ///
    /// A negative or NaN bound matches nothing; `f64::INFINITY` matches
    /// everything.
    pub fn radial_search(
        &self,
        query: &CartesianPoint,
        max_squared_radius: f64,
        max_count: usize,
    ) -> Vec<SearchHit<'_, V>> {
        self.search(query, max_squared_radius, max_count)
    }

    /// Branch-and-bound descent shared by both queries.
    ///
    /// Each pending subtree carries a lower bound on the squared distance of
    /// anything inside it. A subtree is skipped when that bound exceeds the
    /// radius, or exceeds the worst retained candidate once the result set is
    /// full. Bounds equal to the worst candidate are still explored so that
    /// ties resolve by sequence.
    fn search(&self, query: &CartesianPoint, max_squared_radius: f64, max_count: usize) -> Vec<SearchHit<'_, V>> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        // `!(x >= 0.0)` also catches NaN.
        if max_count == 0 || !(max_squared_radius >= 0.0) || !query.is_finite() {
            return Vec::new();
        }

        let capacity = max_count.min(self.nodes.len());
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(capacity);
        let mut stack: SmallVec<[(NodeId, f64); 64]> = smallvec![(root, 0.0)];

        while let Some((id, bound)) = stack.pop() {
            if bound > max_squared_radius {
                continue;
            }
            if heap.len() == capacity
                && let Some(worst) = heap.peek()
                && bound > worst.distance_squared
            {
                continue;
            }

            let node = &self.nodes[id];
            let distance_squared = query.distance_squared(&node.point);
            if distance_squared <= max_squared_radius {
                let candidate = Candidate {
                    distance_squared,
                    seq: node.seq,
                    node: id,
                };
                if heap.len() < capacity {
                    heap.push(candidate);
                } else if let Some(mut worst) = heap.peek_mut()
                    && candidate < *worst
                {
                    *worst = candidate;
                }
            }

            let diff = query.coord(node.axis) - node.point.coord(node.axis);
            let (near, far) = if diff < 0.0 {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            // Far side first so the near side is popped first.
            if let Some(far) = far {
                stack.push((far, bound.max(diff * diff)));
            }
            if let Some(near) = near {
                stack.push((near, bound));
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|candidate| {
                let node = &self.nodes[candidate.node];
                SearchHit {
                    point: node.point,
                    value: &node.value,
                    distance_squared: candidate.distance_squared,
                }
            })
            .collect()
    }
}

impl<V> Default for SpatialTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrange `entries` in place so every subslice holds its median at the middle
/// position, recording each position's split axis and children in `links`.
///
/// `offset` is the position of `entries[0]` in the full arena.
fn arrange<V>(
    entries: &mut [Node<V>],
    offset: usize,
    depth: usize,
    links: &mut [(usize, Option<NodeId>, Option<NodeId>)],
) -> Option<NodeId> {
    if entries.is_empty() {
        return None;
    }

    let axis = depth % DIMENSIONS;
    let median = entries.len() / 2;
    entries.select_nth_unstable_by(median, |a, b| {
        a.point
            .coord(axis)
            .total_cmp(&b.point.coord(axis))
            .then(a.seq.cmp(&b.seq))
    });

    let (lower, rest) = entries.split_at_mut(median);
    let upper = &mut rest[1..];
    let left = arrange(lower, offset, depth + 1, links);
    let right = arrange(upper, offset + median + 1, depth + 1, links);

    let id = offset + median;
    links[id] = (axis, left, right);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(count: usize, seed: u64) -> Vec<CartesianPoint> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                CartesianPoint::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                )
            })
            .collect()
    }

    fn build(points: &[CartesianPoint]) -> SpatialTree<usize> {
        let mut tree = SpatialTree::new();
        for (i, p) in points.iter().enumerate() {
            tree.insert(*p, i);
        }
        tree
    }

    /// Linear scan ordered by (distance, insertion index).
    fn brute_force(points: &[CartesianPoint], query: &CartesianPoint, max_sq: f64, k: usize) -> Vec<usize> {
        let mut all: Vec<(f64, usize)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (query.distance_squared(p), i))
            .filter(|(d, _)| *d <= max_sq)
            .collect();
        all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        all.into_iter().take(k).map(|(_, i)| i).collect()
    }

    fn values(hits: &[SearchHit<'_, usize>]) -> Vec<usize> {
        hits.iter().map(|h| *h.value).collect()
    }

    /// Check the k-d split rule for every node against all of its descendants.
    fn assert_kd_invariant<V>(tree: &SpatialTree<V>) {
        fn subtree<V>(tree: &SpatialTree<V>, start: Option<NodeId>) -> Vec<NodeId> {
            let mut out = Vec::new();
            let mut stack: Vec<NodeId> = start.into_iter().collect();
            while let Some(id) = stack.pop() {
                out.push(id);
                stack.extend(tree.nodes[id].left);
                stack.extend(tree.nodes[id].right);
            }
            out
        }

        let reachable = subtree(tree, tree.root);
        assert_eq!(reachable.len(), tree.len(), "every node must be reachable");

        for id in reachable {
            let node = &tree.nodes[id];
            let split = node.point.coord(node.axis);
            for l in subtree(tree, node.left) {
                assert!(tree.nodes[l].point.coord(node.axis) <= split);
            }
            for r in subtree(tree, node.right) {
                assert!(tree.nodes[r].point.coord(node.axis) >= split);
            }
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree: SpatialTree<()> = SpatialTree::new();
        let origin = CartesianPoint::new(0.0, 0.0, 0.0);

        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.nearest_neighbours(&origin, 5).is_empty());
        assert!(tree.radial_search(&origin, f64::INFINITY, 5).is_empty());
    }

    #[test]
    fn test_rebuild_empty_is_noop() {
        let mut tree: SpatialTree<()> = SpatialTree::new();
        tree.rebuild();
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
    }

    #[test]
    fn test_zero_count_and_bad_radius() {
        let points = random_points(50, 1);
        let tree = build(&points);
        let q = CartesianPoint::new(0.1, 0.2, 0.3);

        assert!(tree.nearest_neighbours(&q, 0).is_empty());
        assert!(tree.radial_search(&q, -1.0, 10).is_empty());
        assert!(tree.radial_search(&q, f64::NAN, 10).is_empty());
        assert!(
            tree.nearest_neighbours(&CartesianPoint::new(f64::NAN, 0.0, 0.0), 3)
                .is_empty()
        );
    }

    #[test]
    fn test_count_bound() {
        let points = random_points(20, 2);
        let tree = build(&points);
        let q = CartesianPoint::new(0.0, 0.0, 0.0);

        assert_eq!(tree.nearest_neighbours(&q, 5).len(), 5);
        assert_eq!(tree.nearest_neighbours(&q, 20).len(), 20);
        assert_eq!(tree.nearest_neighbours(&q, 1000).len(), 20);
    }

    #[test]
    fn test_self_lookup_returns_zero_distance() {
        let points = random_points(300, 3);
        let mut tree = build(&points);
        tree.rebuild();

        for (i, p) in points.iter().enumerate() {
            let hits = tree.nearest_neighbours(p, 1);
            assert_eq!(*hits[0].value, i);
            assert_eq!(hits[0].distance_squared, 0.0);
            assert_eq!(hits[0].point, *p);
        }
    }

    #[test]
    fn test_matches_brute_force_before_and_after_rebuild() {
        let points = random_points(500, 4);
        let mut tree = build(&points);
        let queries = random_points(40, 5);

        for round in 0..3 {
            for q in &queries {
                for k in [1, 3, 17, 500] {
                    assert_eq!(
                        values(&tree.nearest_neighbours(q, k)),
                        brute_force(&points, q, f64::INFINITY, k),
                        "knn mismatch in round {round}, k = {k}"
                    );
                }
                for r2 in [0.0, 0.01, 0.25, 1.5] {
                    assert_eq!(
                        values(&tree.radial_search(q, r2, usize::MAX)),
                        brute_force(&points, q, r2, usize::MAX),
                        "radial mismatch in round {round}, r2 = {r2}"
                    );
                    assert_eq!(
                        values(&tree.radial_search(q, r2, 4)),
                        brute_force(&points, q, r2, 4)
                    );
                }
            }
            tree.rebuild();
        }
    }

    #[test]
    fn test_results_ascending() {
        let points = random_points(200, 6);
        let mut tree = build(&points);
        tree.rebuild();

        let hits = tree.nearest_neighbours(&CartesianPoint::new(0.3, -0.2, 0.5), 200);
        assert!(
            hits.windows(2)
                .all(|w| w[0].distance_squared <= w[1].distance_squared)
        );
    }

    #[test]
    fn test_kd_invariant_holds() {
        let points = random_points(400, 7);
        let mut tree = build(&points);
        assert_kd_invariant(&tree);

        tree.rebuild();
        assert_kd_invariant(&tree);

        for p in random_points(100, 8) {
            tree.insert(p, 0);
        }
        assert_kd_invariant(&tree);
    }

    #[test]
    fn test_kd_invariant_with_repeated_axis_values() {
        let mut tree = SpatialTree::new();
        for i in 0..200 {
            let v = (i % 5) as f64;
            tree.insert(CartesianPoint::new(v, (i % 3) as f64, 1.0), i);
        }
        assert_kd_invariant(&tree);
        tree.rebuild();
        assert_kd_invariant(&tree);
    }

    #[test]
    fn test_rebuild_balances_height() {
        for n in [1usize, 2, 3, 7, 8, 100, 1023, 1024, 5000] {
            // Points along a diagonal degenerate into a chain when inserted in order.
            let mut tree = SpatialTree::new();
            for i in 0..n {
                let v = i as f64;
                tree.insert(CartesianPoint::new(v, v, v), i);
            }
            assert_eq!(tree.height(), n);

            tree.rebuild();
            let bound = (n as f64 + 1.0).log2().ceil() as usize;
            assert!(tree.height() <= bound, "height {} > {bound} for n = {n}", tree.height());
            assert_eq!(tree.len(), n);
        }
    }

    #[test]
    fn test_deep_chain_queries_do_not_recurse() {
        let n = 10_000;
        let mut tree = SpatialTree::new();
        for i in 0..n {
            let v = i as f64;
            tree.insert(CartesianPoint::new(v, v, v), i);
        }

        let hits = tree.nearest_neighbours(&CartesianPoint::new(9_999.0, 9_999.0, 9_999.0), 2);
        assert_eq!(values(&hits), vec![9_999, 9_998]);
        assert_eq!(tree.height(), n);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let points = random_points(257, 9);
        let mut a = build(&points);
        let mut b = build(&points);
        a.rebuild();
        b.rebuild();
        b.rebuild();

        let order_a: Vec<usize> = a.iter().map(|(_, v)| *v).collect();
        let order_b: Vec<usize> = b.iter().map(|(_, v)| *v).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn test_equal_distance_ties_follow_insertion_order() {
        // Six points at unit distance from the origin.
        let axes = [
            CartesianPoint::new(0.0, 0.0, 1.0),
            CartesianPoint::new(-1.0, 0.0, 0.0),
            CartesianPoint::new(0.0, 1.0, 0.0),
            CartesianPoint::new(1.0, 0.0, 0.0),
            CartesianPoint::new(0.0, -1.0, 0.0),
            CartesianPoint::new(0.0, 0.0, -1.0),
        ];
        let mut tree = build(&axes);
        let origin = CartesianPoint::new(0.0, 0.0, 0.0);

        assert_eq!(values(&tree.nearest_neighbours(&origin, 6)), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(values(&tree.nearest_neighbours(&origin, 2)), vec![0, 1]);

        tree.rebuild();
        assert_eq!(values(&tree.nearest_neighbours(&origin, 6)), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(values(&tree.radial_search(&origin, 1.0, 3)), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_policies() {
        let p = CartesianPoint::new(0.5, 0.5, 0.5);
        let q = CartesianPoint::new(-0.5, 0.5, 0.5);

        let mut tree = SpatialTree::new();
        assert_eq!(tree.insert_with_policy(p, "first", DuplicatePolicy::Keep), InsertOutcome::Inserted);
        assert_eq!(tree.insert_with_policy(p, "second", DuplicatePolicy::Keep), InsertOutcome::Inserted);
        assert_eq!(tree.len(), 2);

        assert_eq!(
            tree.insert_with_policy(p, "third", DuplicatePolicy::Skip),
            InsertOutcome::Skipped("third")
        );
        assert_eq!(
            tree.insert_with_policy(p, "fourth", DuplicatePolicy::Reject),
            InsertOutcome::Rejected("fourth")
        );
        assert_eq!(
            tree.insert_with_policy(p, "fifth", DuplicatePolicy::Replace),
            InsertOutcome::Replaced("first")
        );
        assert_eq!(
            tree.insert_with_policy(q, "other", DuplicatePolicy::Reject),
            InsertOutcome::Inserted
        );
        assert_eq!(tree.len(), 3);

        // The replaced value keeps the first slot in tie order.
        let hits = tree.nearest_neighbours(&p, 2);
        assert_eq!(*hits[0].value, "fifth");
        assert_eq!(*hits[1].value, "second");
    }

    #[test]
    fn test_find_coincident_after_rebuild() {
        let mut tree = SpatialTree::new();
        let target = CartesianPoint::new(0.0, 0.0, 0.0);
        for i in 0..64 {
            // Many points share x = 0 so equal split values land on both sides.
            let p = CartesianPoint::new(0.0, (i as f64) / 64.0, -(i as f64) / 64.0);
            tree.insert(p, i);
        }
        tree.insert(target, 999);
        tree.rebuild();

        assert_eq!(tree.find_coincident(&target), Some(&0));
        assert_eq!(
            tree.find_coincident(&CartesianPoint::new(0.0, 63.0 / 64.0, -63.0 / 64.0)),
            Some(&63)
        );
        assert_eq!(tree.find_coincident(&CartesianPoint::new(0.1, 0.0, 0.0)), None);
    }

    #[test]
    fn test_insert_after_rebuild() {
        let points = random_points(100, 10);
        let mut tree = build(&points);
        tree.rebuild();

        let extra = random_points(50, 11);
        let mut all = points.clone();
        for (i, p) in extra.iter().enumerate() {
            tree.insert(*p, 100 + i);
            all.push(*p);
        }

        let q = CartesianPoint::new(0.2, 0.2, 0.2);
        assert_eq!(values(&tree.nearest_neighbours(&q, 10)), brute_force(&all, &q, f64::INFINITY, 10));
    }

    #[test]
    fn test_clear() {
        let mut tree = build(&random_points(10, 12));
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.nearest_neighbours(&CartesianPoint::new(0.0, 0.0, 0.0), 1).is_empty());
    }
}
