//! Single-source (and multi-source) Dijkstra search.
//!
//! # Lifecycle
//!
//! ```text
//! DijkstraSearch::new(&criteria)   Initialized — sources queued at cost 0
//!        │
//!        ▼  run(&graph)            Running     — settle, relax, repeat
//!        │
//!        ▼                         Terminated  — target settled, or frontier empty
//!     Response { tree, costs, termination }
//! ```
//!
//! `run` consumes the search, so a finished engine cannot be resumed.  The
//! graph is only borrowed; every piece of mutable state (queue, visited set,
//! cost map, tree) belongs to this one search, which lets several searches
//! share one graph concurrently.
//!
//! # Settling
//!
//! Each iteration peeks the cheapest frontier entry.  If its node is
//! already visited the entry is stale (a cheaper one was settled earlier)
//! and is dropped.  Otherwise the node gets a tree id, is linked to its
//! predecessor, is marked visited, and its outgoing edges are relaxed.
//!
//! # Limitations
//!
//! - Only the first id in `Criteria::targets` stops the search early.
//! - Negative edge weights are not rejected; results are then undefined.
//! - `FrontierEntry::depth` is tracked but does not bound the search.

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

use gs_core::{GeoPoint, NodeId};

use crate::bitset::Bitset;
use crate::graph::Graph;
use crate::heap::{FrontierEntry, PriorityQueue};
use crate::tree::ShortestPathTree;
use crate::{GraphError, GraphResult};

/// Cost reported for nodes that were never reached.
pub const INFINITE: f32 = f32::MAX;

// ── Criteria ──────────────────────────────────────────────────────────────────

/// What to search for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Start nodes, all at cost 0.  Must be non-empty for a useful search.
    pub sources: Vec<NodeId>,
    /// Destination nodes.  Only the first one triggers early termination.
    pub targets: Vec<NodeId>,
}

impl Criteria {
    /// Explore everything reachable from `sources`.
    pub fn from_sources(sources: impl IntoIterator<Item = NodeId>) -> Self {
        Self { sources: sources.into_iter().collect(), targets: Vec::new() }
    }

    /// One source, one target.
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self { sources: vec![source], targets: vec![target] }
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.targets.push(target);
        self
    }
}

// ── Costs ─────────────────────────────────────────────────────────────────────

/// Best known total cost per graph node.  Absent = not reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Costs(FxHashMap<NodeId, f32>);

impl Costs {
    pub fn get(&self, id: NodeId) -> Option<f32> {
        self.0.get(&id).copied()
    }

    /// Cost of `id`, or [`INFINITE`] if it was not reached.
    pub fn get_or_infinite(&self, id: NodeId) -> f32 {
        self.get(id).unwrap_or(INFINITE)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        self.0.iter().map(|(&id, &c)| (id, c))
    }

    fn set(&mut self, id: NodeId, cost: f32) {
        self.0.insert(id, cost);
    }
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Why a search stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Termination {
    /// The configured target was settled; remaining frontier entries were discarded.
    TargetReached,
    /// The frontier emptied: every node reachable from the sources is settled.
    FrontierExhausted,
}

/// Output of [`DijkstraSearch::run`].
#[derive(Clone, Debug)]
pub struct Response {
    /// Settled nodes and the edges by which they were reached.
    pub tree: ShortestPathTree,
    /// Best known cost for every node that entered the frontier.
    pub costs: Costs,
    pub termination: Termination,
}

impl Response {
    /// Total cost to `target`.
    ///
    /// # Errors
    /// [`GraphError::NoPath`] if `target` was never reached.
    pub fn cost_to(&self, target: NodeId) -> GraphResult<f32> {
        self.costs.get(target).ok_or(GraphError::NoPath { target })
    }

    /// Coordinates of the shortest path, source first.
    ///
    /// # Errors
    /// [`GraphError::NoPath`] if `target` was not settled by this search.
    pub fn path_to(&self, target: NodeId, graph: &Graph) -> GraphResult<Vec<GeoPoint>> {
        let tree_id = self.tree.tree_id(target).ok_or(GraphError::NoPath { target })?;
        let mut coords = self.tree.path_coords(tree_id, graph);
        coords.reverse();
        Ok(coords)
    }

    /// Graph node ids along the shortest path, source first.
    ///
    /// # Errors
    /// [`GraphError::NoPath`] if `target` was not settled by this search.
    pub fn nodes_to(&self, target: NodeId) -> GraphResult<Vec<NodeId>> {
        let tree_id = self.tree.tree_id(target).ok_or(GraphError::NoPath { target })?;
        let mut nodes = self.tree.path_nodes(tree_id);
        nodes.reverse();
        Ok(nodes)
    }
}

// ── DijkstraSearch ────────────────────────────────────────────────────────────

/// One Dijkstra run.  Build with [`new`](Self::new), execute with [`run`](Self::run).
pub struct DijkstraSearch {
    queue:   PriorityQueue,
    visited: Bitset,
    sources: Bitset,
    tree:    ShortestPathTree,
    costs:   Costs,
    target:  Option<NodeId>,
}

impl DijkstraSearch {
    /// Seed the frontier with every source at cost 0.
    pub fn new(criteria: &Criteria) -> Self {
        let mut search = Self {
            queue:   PriorityQueue::with_capacity(criteria.sources.len()),
            visited: Bitset::new(),
            sources: Bitset::new(),
            tree:    ShortestPathTree::new(),
            costs:   Costs::default(),
            target:  criteria.targets.first().copied(),
        };

        for &source in &criteria.sources {
            search.costs.set(source, 0.0);
            search.sources.set(source.index(), true);
            search.queue.insert(FrontierEntry::source(source));
        }

        search
    }

    /// `true` if `id` was given as a source.
    pub fn is_source(&self, id: NodeId) -> bool {
        self.sources.exists(id.index())
    }

    /// The early-termination target, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Run to completion against `graph`.
    pub fn run(mut self, graph: &Graph) -> Response {
        let _span = debug_span!("dijkstra", target = ?self.target).entered();
        let mut pushes = self.queue.len();

        while let Some(&entry) = self.queue.peek_min() {
            if self.visited.exists(entry.node.index()) {
                self.queue.delete_min();
                continue;
            }

            let tree_id = self.settle(&entry);
            self.visited.set(entry.node.index(), true);

            if self.target == Some(entry.node) {
                return self.finish(Termination::TargetReached, pushes);
            }

            pushes += self.relax(graph, &entry, tree_id);
            self.queue.delete_min();
        }

        self.finish(Termination::FrontierExhausted, pushes)
    }

    /// Append `entry.node` to the tree and link it to its predecessor.
    fn settle(&mut self, entry: &FrontierEntry) -> NodeId {
        let tree_id = self.tree.push(entry.node, entry.cost, entry.dist);
        if let Some(parent) = entry.previous.filter(|&p| p != tree_id) {
            self.tree.link(parent, tree_id);
        }
        trace!(node = entry.node.0, tree_id = tree_id.0, cost = entry.cost, depth = entry.depth, "settled");
        tree_id
    }

    /// Offer every unvisited neighbour of `entry.node` a path through it.
    /// Returns the number of frontier entries inserted.
    fn relax(&mut self, graph: &Graph, entry: &FrontierEntry, tree_id: NodeId) -> usize {
        let mut inserted = 0;
        for edge in graph.out_edges(entry.node) {
            if self.visited.exists(edge.node.index()) {
                continue;
            }
            let candidate = entry.cost + edge.weight;
            if candidate < self.costs.get_or_infinite(edge.node) {
                self.costs.set(edge.node, candidate);
                self.queue.insert(FrontierEntry {
                    node:     edge.node,
                    cost:     candidate,
                    depth:    entry.depth + 1,
                    previous: Some(tree_id),
                    dist:     entry.dist + edge.meta.distance_m,
                });
                inserted += 1;
            }
        }
        inserted
    }

    fn finish(self, termination: Termination, pushes: usize) -> Response {
        debug!(
            settled = self.tree.len(),
            reached = self.costs.len(),
            pushes,
            discarded = self.queue.len(),
            ?termination,
            "search finished"
        );
        Response { tree: self.tree, costs: self.costs, termination }
    }
}
