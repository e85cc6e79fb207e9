//! Shortest-path tree produced by a search.
//!
//! The tree is itself a [`Graph`]: one tree node per finalized graph node,
//! appended in finalization order, with a single `LeftToRight` edge from
//! each non-root node's predecessor.  Tree ids are positions in the tree;
//! the tree node's `rank` holds the searched graph's node id.
//!
//! Tree edges carry deltas: `weight` is the cost of the last hop and
//! `meta.distance_m` its length, so summing weights from a root to a tree
//! node gives that node's total cost.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use gs_core::{GeoPoint, NodeId, SpatialKey};

use crate::graph::{EdgeDirection, EdgeMeta, Graph};

#[derive(Clone, Debug, Default)]
pub struct ShortestPathTree {
    graph: Graph,
    /// Searched-graph node id → tree id.
    by_origin: FxHashMap<NodeId, NodeId>,
    /// Total cost per tree id.
    cost: Vec<f32>,
    /// Total edge distance per tree id.
    dist: Vec<f32>,
}

impl ShortestPathTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tree node for `origin` reached at total `cost`/`dist`.
    pub(crate) fn push(&mut self, origin: NodeId, cost: f32, dist: f32) -> NodeId {
        let tree_id = self.graph.add_ranked_node(SpatialKey::default(), origin.0);
        self.by_origin.insert(origin, tree_id);
        self.cost.push(cost);
        self.dist.push(dist);
        tree_id
    }

    /// Record that `child` was reached through `parent`.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        let weight = self.cost[child.index()] - self.cost[parent.index()];
        let meta = EdgeMeta::with_distance(self.dist[child.index()] - self.dist[parent.index()]);
        let linked = self
            .graph
            .relate(parent, child, weight, EdgeDirection::LeftToRight, meta);
        debug_assert!(linked.is_ok(), "tree link {parent} → {child} to a missing node");
    }

    /// Number of finalized nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// The underlying tree graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Searched-graph node for `tree_id`.
    pub fn origin(&self, tree_id: NodeId) -> Option<NodeId> {
        self.graph.node(tree_id).map(|n| NodeId(n.rank))
    }

    /// Tree id assigned to graph node `origin`, if it was finalized.
    pub fn tree_id(&self, origin: NodeId) -> Option<NodeId> {
        self.by_origin.get(&origin).copied()
    }

    /// Predecessor of `tree_id`; `None` for roots (sources).
    pub fn parent(&self, tree_id: NodeId) -> Option<NodeId> {
        self.graph.in_edges(tree_id).first().map(|e| e.node)
    }

    /// Total cost at which `tree_id` was finalized.
    pub fn cost(&self, tree_id: NodeId) -> Option<f32> {
        self.cost.get(tree_id.index()).copied()
    }

    /// Total edge distance along the path to `tree_id`.
    pub fn distance(&self, tree_id: NodeId) -> Option<f32> {
        self.dist.get(tree_id.index()).copied()
    }

    /// Graph node ids from `target` back to its root, target first.
    pub fn path_nodes(&self, target: NodeId) -> Vec<NodeId> {
        self.walk_back(target).filter_map(|t| self.origin(t)).collect()
    }

    /// Coordinates from `target` back to its root, target first.
    ///
    /// Tree ids are translated through `graph` (the graph that was
    /// searched).  Reverse the result for source-to-target order.
    pub fn path_coords(&self, target: NodeId, graph: &Graph) -> Vec<GeoPoint> {
        self.walk_back(target)
            .filter_map(|t| self.origin(t))
            .filter_map(|origin| graph.position(origin))
            .collect()
    }

    /// Breadth-first walk over incoming tree edges starting at `target`.
    ///
    /// Every non-root tree node has exactly one incoming edge, so this is a
    /// straight walk to the root; the queue keeps it correct for trees with
    /// several predecessors per node.
    fn walk_back(&self, target: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut queue = VecDeque::new();
        if target.index() < self.len() {
            queue.push_back(target);
        }
        std::iter::from_fn(move || {
            let tree_id = queue.pop_front()?;
            queue.extend(self.graph.in_edges(tree_id).iter().map(|e| e.node));
            Some(tree_id)
        })
    }
}
