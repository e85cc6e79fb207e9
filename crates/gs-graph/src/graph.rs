//! Directed weighted graph with dual adjacency indexing.
//!
//! # Data layout
//!
//! ```text
//! nodes[n]     — Node with id n
//! outgoing[n]  — edges leaving n   (edge.node = head)
//! incoming[n]  — edges entering n  (edge.node = tail)
//! ```
//!
//! All three vectors are index-aligned: `add_node` pushes to each of them,
//! so a node's id is always its position.  Edges are only ever written by
//! [`Graph::relate`], which records every directed edge `a → b` twice (in
//! `outgoing[a]` and in `incoming[b]`), so the two indices never disagree.
//!
//! A graph is built once (by ingestion or by hand) and then treated as
//! read-only; searches borrow it immutably and keep their own state.

use gs_core::{GeoPoint, NodeId, RoadClass, SpatialKey};

use crate::{GraphError, GraphResult};

/// A graph vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Position in the owning graph.
    pub id: NodeId,
    /// Encoded geographic position.
    pub key: SpatialKey,
    /// Context-dependent integer.  Unused (0) in road graphs; in a
    /// shortest-path tree it holds the searched graph's node id.
    pub rank: u32,
}

/// Descriptive edge data carried for reporting.  Never used to compare paths.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeMeta {
    /// Assumed travel speed, km/h.
    pub speed_kmh: f32,
    /// Physical length, metres.
    pub distance_m: f32,
    pub road: RoadClass,
}

impl EdgeMeta {
    /// Metadata carrying only a distance.
    pub fn with_distance(distance_m: f32) -> Self {
        Self { distance_m, ..Self::default() }
    }
}

/// One adjacency entry.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// The other endpoint: the head in `outgoing`, the tail in `incoming`.
    pub node: NodeId,
    /// Optimisation criterion (travel cost).
    pub weight: f32,
    pub meta: EdgeMeta,
}

/// Which directed edges [`Graph::relate`] writes for a pair `(a, b)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeDirection {
    /// `a → b` and `b → a`.
    Bidirectional,
    /// `a → b` only.
    LeftToRight,
    /// `b → a` only.
    RightToLeft,
}

/// Directed weighted graph.  See the module docs for the layout.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes:    Vec<Node>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes:    Vec::with_capacity(nodes),
            outgoing: Vec::with_capacity(nodes),
            incoming: Vec::with_capacity(nodes),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add a node at `key` and return its id (sequential from 0).
    pub fn add_node(&mut self, key: SpatialKey) -> NodeId {
        self.add_ranked_node(key, 0)
    }

    /// Add a node with an explicit `rank`.
    pub fn add_ranked_node(&mut self, key: SpatialKey, rank: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, key, rank });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Connect `a` and `b` according to `dir`.
    ///
    /// Every directed edge `x → y` written here lands in both `outgoing[x]`
    /// and `incoming[y]`, with the same weight and metadata.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is not in the graph.
    /// Nothing is written in that case.
    pub fn relate(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: f32,
        dir: EdgeDirection,
        meta: EdgeMeta,
    ) -> GraphResult<()> {
        for id in [a, b] {
            if id.index() >= self.nodes.len() {
                return Err(GraphError::NodeNotFound(id));
            }
        }

        match dir {
            EdgeDirection::Bidirectional => {
                self.push_edge(a, b, weight, meta);
                self.push_edge(b, a, weight, meta);
            }
            EdgeDirection::LeftToRight => self.push_edge(a, b, weight, meta),
            EdgeDirection::RightToLeft => self.push_edge(b, a, weight, meta),
        }
        Ok(())
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, weight: f32, meta: EdgeMeta) {
        self.outgoing[from.index()].push(Edge { node: to, weight, meta });
        self.incoming[to.index()].push(Edge { node: from, weight, meta });
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Decoded position of `id`, or `None` if the node does not exist.
    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.node(id).map(|n| n.key.to_geo())
    }

    /// Edges leaving `id`.  Empty for unknown ids.
    #[inline]
    pub fn out_edges(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges entering `id`; each `edge.node` is the tail.  Empty for unknown ids.
    #[inline]
    pub fn in_edges(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.out_edges(id).len()
    }

    #[inline]
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.in_edges(id).len()
    }
}
