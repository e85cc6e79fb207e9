//! Coordinate → node resolution on top of the k-d tree.
//!
//! Node positions are projected to Web-Mercator metres before indexing, so
//! Euclidean distance in the tree approximates ground distance at city
//! scale (the Mercator scale factor grows with latitude; distances are
//! "projected metres", not haversine metres).

use gs_core::{GeoPoint, NodeId};
use gs_index::{KdTree, Vector};

use crate::graph::Graph;

/// Spatial index over the routable nodes of a [`Graph`].
pub struct NodeIndex {
    tree: KdTree,
}

impl NodeIndex {
    /// Index every node of `graph` that has at least one outgoing edge.
    ///
    /// Nodes without outgoing edges are dead ends for a search starting
    /// there, so they are never offered as snap candidates.
    pub fn build(graph: &Graph) -> Self {
        let points = graph
            .nodes()
            .iter()
            .filter(|n| graph.out_degree(n.id) > 0)
            .map(|n| project(n.id, n.key.to_geo()))
            .collect();
        Self { tree: KdTree::build(points) }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Nearest indexed node to `pos` and its projected distance in metres.
    ///
    /// Returns `None` only if the index is empty.
    pub fn snap(&self, pos: GeoPoint) -> Option<(NodeId, f64)> {
        self.tree
            .find_nearest(&project(NodeId::INVALID, pos))
            .map(|(v, d2)| (v.id, d2.sqrt()))
    }

    /// All indexed nodes within `radius_m` projected metres of `pos`.
    pub fn within(&self, pos: GeoPoint, radius_m: f64) -> Vec<NodeId> {
        self.tree
            .range_query(&project(NodeId::INVALID, pos), radius_m)
            .into_iter()
            .map(|v| v.id)
            .collect()
    }

    /// The underlying k-d tree.
    pub fn kdtree(&self) -> &KdTree {
        &self.tree
    }
}

impl Graph {
    /// Shorthand for [`NodeIndex::build`].
    pub fn build_node_index(&self) -> NodeIndex {
        NodeIndex::build(self)
    }
}

fn project(id: NodeId, pos: GeoPoint) -> Vector {
    let (x, y) = pos.to_mercator();
    Vector::planar(id, x, y)
}
