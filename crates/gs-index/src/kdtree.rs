//! Balanced k-d tree stored in an arena.
//!
//! # Construction
//!
//! At depth `d` the splitting axis is `d % k`.  The current slice is sorted
//! along that axis, its median becomes the node, and the two halves on
//! either side are built recursively at `d + 1`.  A full sort per level
//! gives O(n log² n) construction; the tree is never rebalanced and does
//! not support insertion or deletion.
//!
//! # Layout
//!
//! Nodes live in a single `Vec<KdNode>`; children are referenced by arena
//! index.  Subtrees are pushed post-order, so the root is the last node.
//!
//! # Invariants
//!
//! For a node splitting on `axis` with value `v`, every point in its left
//! subtree has `p[axis] <= v` and every point in its right subtree has
//! `p[axis] >= v`.  Equal coordinates may land on either side, which is why
//! both query pruning rules below are inclusive.

use tracing::debug;

use crate::Vector;

struct KdNode {
    point: Vector,
    left:  Option<usize>,
    right: Option<usize>,
}

/// Immutable k-d tree over [`Vector`]s of one fixed dimensionality.
pub struct KdTree {
    nodes: Vec<KdNode>,
    root:  Option<usize>,
    dim:   usize,
}

impl KdTree {
    /// Build a balanced tree from `points`.
    ///
    /// # Panics
    ///
    /// Panics if the points do not all share the same dimensionality, or if
    /// they are zero-dimensional.
    pub fn build(mut points: Vec<Vector>) -> Self {
        let dim = points.first().map_or(0, Vector::dim);
        if !points.is_empty() {
            assert!(dim > 0, "k-d tree points must have at least one dimension");
        }
        for p in &points {
            assert_eq!(
                p.dim(),
                dim,
                "k-d tree point {} has dimension {}, expected {}",
                p.id,
                p.dim(),
                dim
            );
        }

        let mut nodes = Vec::with_capacity(points.len());
        let root = build_subtree(&mut points, 0, dim, &mut nodes);
        debug!(points = nodes.len(), dim, "k-d tree built");

        Self { nodes, root, dim }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimensionality shared by every point (0 for an empty tree).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// All indexed points, in arena order.
    pub fn points(&self) -> impl Iterator<Item = &Vector> + '_ {
        self.nodes.iter().map(|n| &n.point)
    }

    /// All points whose Euclidean distance to `center` is `<= radius`.
    ///
    /// Result order is traversal order and carries no meaning.
    ///
    /// # Panics
    /// Panics if `center` has a different dimension than the indexed points.
    pub fn range_query(&self, center: &Vector, radius: f64) -> Vec<&Vector> {
        let mut out = Vec::new();
        if self.root.is_some() {
            self.check_dim(center);
            self.range_into(self.root, center, radius, 0, &mut out);
        }
        out
    }

    /// The nearest indexed point to `target` and its **squared** distance.
    ///
    /// Returns `None` only for an empty tree.  Among equidistant points the
    /// first one reached by the traversal wins.
    ///
    /// # Panics
    /// Panics if `target` has a different dimension than the indexed points.
    pub fn find_nearest(&self, target: &Vector) -> Option<(&Vector, f64)> {
        self.root?;
        self.check_dim(target);
        let mut best: Option<(usize, f64)> = None;
        self.nearest_into(self.root, target, 0, &mut best);
        best.map(|(i, d)| (&self.nodes[i].point, d))
    }

    fn check_dim(&self, query: &Vector) {
        assert_eq!(
            query.dim(),
            self.dim,
            "query dimension {} does not match k-d tree dimension {}",
            query.dim(),
            self.dim
        );
    }

    fn range_into<'a>(
        &'a self,
        idx: Option<usize>,
        center: &Vector,
        radius: f64,
        depth: usize,
        out: &mut Vec<&'a Vector>,
    ) {
        let Some(i) = idx else { return };
        let node = &self.nodes[i];
        let axis = depth % self.dim;

        if node.point.distance_squared(center) <= radius * radius {
            out.push(&node.point);
        }
        if center[axis] - radius <= node.point[axis] {
            self.range_into(node.left, center, radius, depth + 1, out);
        }
        if center[axis] + radius >= node.point[axis] {
            self.range_into(node.right, center, radius, depth + 1, out);
        }
    }

    fn nearest_into(
        &self,
        idx: Option<usize>,
        target: &Vector,
        depth: usize,
        best: &mut Option<(usize, f64)>,
    ) {
        let Some(i) = idx else { return };
        let node = &self.nodes[i];
        let axis = depth % self.dim;

        let dist = node.point.distance_squared(target);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            *best = Some((i, dist));
        }

        let diff = target[axis] - node.point[axis];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.nearest_into(near, target, depth + 1, best);

        // Only cross the splitting plane if it is closer than the best so far.
        let best_dist = best.map_or(f64::INFINITY, |(_, d)| d);
        if diff.abs() < best_dist.sqrt() {
            self.nearest_into(far, target, depth + 1, best);
        }
    }
}

fn build_subtree(
    points: &mut [Vector],
    depth: usize,
    dim: usize,
    arena: &mut Vec<KdNode>,
) -> Option<usize> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % dim;
    points.sort_unstable_by(|a, b| a[axis].total_cmp(&b[axis]));

    let mid = points.len() / 2;
    let (lower, rest) = points.split_at_mut(mid);
    let (median, upper) = rest.split_first_mut()?;

    let left = build_subtree(lower, depth + 1, dim, arena);
    let right = build_subtree(upper, depth + 1, dim, arena);

    // The median slot is never revisited, so its coordinates can be moved out.
    let point = Vector {
        id: median.id,
        components: std::mem::take(&mut median.components),
    };
    arena.push(KdNode { point, left, right });
    Some(arena.len() - 1)
}
